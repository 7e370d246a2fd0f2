//! Static language rule table.
//!
//! Maps file names and extensions to a [`LanguageDescriptor`]: the lexical
//! rules the classifier needs to tell code from comments for one language.
//! The table is built once behind a `OnceLock` and shared read-only by all
//! workers; no synchronization is needed after construction.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

/// Lexical comment/string rules for one recognized language.
///
/// Descriptors are `'static` and immutable; workers hold plain references.
#[derive(Debug, PartialEq, Eq)]
pub struct LanguageDescriptor {
    /// Display name ("Rust", "C++", ...)
    pub name: &'static str,
    /// Tokens that comment out the rest of a line (`//`, `#`, `--`)
    pub line_markers: &'static [&'static str],
    /// Open/close delimiter pairs for block comments, tried in order
    pub block_delimiters: &'static [(&'static str, &'static str)],
    /// Whether block comments of this language nest
    pub nestable: bool,
    /// Characters that open a string region, in which markers are inert
    pub string_quotes: &'static [char],
    /// Escape character honored inside string regions
    pub escape_char: Option<char>,
}

const fn c_like(name: &'static str) -> LanguageDescriptor {
    LanguageDescriptor {
        name,
        line_markers: &["//"],
        block_delimiters: &[("/*", "*/")],
        nestable: false,
        string_quotes: &['"', '\''],
        escape_char: Some('\\'),
    }
}

const fn c_like_nested(name: &'static str) -> LanguageDescriptor {
    LanguageDescriptor {
        name,
        line_markers: &["//"],
        block_delimiters: &[("/*", "*/")],
        nestable: true,
        string_quotes: &['"', '\''],
        escape_char: Some('\\'),
    }
}

const fn hash_like(name: &'static str) -> LanguageDescriptor {
    LanguageDescriptor {
        name,
        line_markers: &["#"],
        block_delimiters: &[],
        nestable: false,
        string_quotes: &['"', '\''],
        escape_char: Some('\\'),
    }
}

const fn markup(name: &'static str) -> LanguageDescriptor {
    LanguageDescriptor {
        name,
        line_markers: &[],
        block_delimiters: &[("<!--", "-->")],
        nestable: false,
        string_quotes: &[],
        escape_char: None,
    }
}

const RUST: LanguageDescriptor = c_like_nested("Rust");
const C: LanguageDescriptor = c_like("C");
const CPP: LanguageDescriptor = c_like("C++");
const CSHARP: LanguageDescriptor = c_like("C#");
const OBJC: LanguageDescriptor = c_like("Objective-C");
const JAVA: LanguageDescriptor = c_like("Java");
const GO: LanguageDescriptor = c_like("Go");
const JAVASCRIPT: LanguageDescriptor = c_like("JavaScript");
const TYPESCRIPT: LanguageDescriptor = c_like("TypeScript");
const DART: LanguageDescriptor = c_like("Dart");
const GROOVY: LanguageDescriptor = c_like("Groovy");
const PROTOBUF: LanguageDescriptor = c_like("Protocol Buffers");
const SWIFT: LanguageDescriptor = c_like_nested("Swift");
const KOTLIN: LanguageDescriptor = c_like_nested("Kotlin");
const SCALA: LanguageDescriptor = c_like_nested("Scala");
const DLANG: LanguageDescriptor = c_like_nested("D");

const ZIG: LanguageDescriptor = LanguageDescriptor {
    name: "Zig",
    line_markers: &["//"],
    block_delimiters: &[],
    nestable: false,
    string_quotes: &['"'],
    escape_char: Some('\\'),
};

const PYTHON: LanguageDescriptor = hash_like("Python");
const SHELL: LanguageDescriptor = hash_like("Shell");
const FISH: LanguageDescriptor = hash_like("Fish");
const PERL: LanguageDescriptor = hash_like("Perl");
const YAML: LanguageDescriptor = hash_like("YAML");
const TOML: LanguageDescriptor = hash_like("TOML");
const ELIXIR: LanguageDescriptor = hash_like("Elixir");
const R: LanguageDescriptor = hash_like("R");
const TCL: LanguageDescriptor = hash_like("Tcl");
const GRAPHQL: LanguageDescriptor = hash_like("GraphQL");
const MAKEFILE: LanguageDescriptor = hash_like("Makefile");
const DOCKERFILE: LanguageDescriptor = hash_like("Dockerfile");
const CMAKE: LanguageDescriptor = hash_like("CMake");

const RUBY: LanguageDescriptor = LanguageDescriptor {
    name: "Ruby",
    line_markers: &["#"],
    block_delimiters: &[("=begin", "=end")],
    nestable: false,
    string_quotes: &['"', '\''],
    escape_char: Some('\\'),
};

const PHP: LanguageDescriptor = LanguageDescriptor {
    name: "PHP",
    line_markers: &["//", "#"],
    block_delimiters: &[("/*", "*/")],
    nestable: false,
    string_quotes: &['"', '\''],
    escape_char: Some('\\'),
};

const BLADE: LanguageDescriptor = LanguageDescriptor {
    name: "Blade",
    line_markers: &[],
    block_delimiters: &[("{{--", "--}}"), ("<!--", "-->")],
    nestable: false,
    string_quotes: &[],
    escape_char: None,
};

const POWERSHELL: LanguageDescriptor = LanguageDescriptor {
    name: "PowerShell",
    line_markers: &["#"],
    block_delimiters: &[("<#", "#>")],
    nestable: false,
    string_quotes: &['"', '\''],
    escape_char: Some('`'),
};

const BATCH: LanguageDescriptor = LanguageDescriptor {
    name: "Batch",
    line_markers: &["REM", "rem", "::"],
    block_delimiters: &[],
    nestable: false,
    string_quotes: &[],
    escape_char: None,
};

const VISUAL_BASIC: LanguageDescriptor = LanguageDescriptor {
    name: "Visual Basic",
    line_markers: &["'"],
    block_delimiters: &[],
    nestable: false,
    string_quotes: &['"'],
    escape_char: None,
};

const SQL: LanguageDescriptor = LanguageDescriptor {
    name: "SQL",
    line_markers: &["--"],
    block_delimiters: &[("/*", "*/")],
    nestable: false,
    string_quotes: &['\'', '"'],
    escape_char: None,
};

const ADA: LanguageDescriptor = LanguageDescriptor {
    name: "Ada",
    line_markers: &["--"],
    block_delimiters: &[],
    nestable: false,
    string_quotes: &['"'],
    escape_char: None,
};

const HASKELL: LanguageDescriptor = LanguageDescriptor {
    name: "Haskell",
    line_markers: &["--"],
    block_delimiters: &[("{-", "-}")],
    nestable: true,
    string_quotes: &['"'],
    escape_char: Some('\\'),
};

const ELM: LanguageDescriptor = LanguageDescriptor {
    name: "Elm",
    line_markers: &["--"],
    block_delimiters: &[("{-", "-}")],
    nestable: true,
    string_quotes: &['"'],
    escape_char: Some('\\'),
};

const LUA: LanguageDescriptor = LanguageDescriptor {
    name: "Lua",
    line_markers: &["--"],
    block_delimiters: &[("--[[", "]]")],
    nestable: false,
    string_quotes: &['"', '\''],
    escape_char: Some('\\'),
};

const OCAML: LanguageDescriptor = LanguageDescriptor {
    name: "OCaml",
    line_markers: &[],
    block_delimiters: &[("(*", "*)")],
    nestable: true,
    string_quotes: &['"'],
    escape_char: Some('\\'),
};

const FSHARP: LanguageDescriptor = LanguageDescriptor {
    name: "F#",
    line_markers: &["//"],
    block_delimiters: &[("(*", "*)")],
    nestable: true,
    string_quotes: &['"'],
    escape_char: Some('\\'),
};

const PASCAL: LanguageDescriptor = LanguageDescriptor {
    name: "Pascal",
    line_markers: &["//"],
    block_delimiters: &[("{", "}"), ("(*", "*)")],
    nestable: false,
    string_quotes: &['\''],
    escape_char: None,
};

const JULIA: LanguageDescriptor = LanguageDescriptor {
    name: "Julia",
    line_markers: &["#"],
    block_delimiters: &[("#=", "=#")],
    nestable: true,
    string_quotes: &['"'],
    escape_char: Some('\\'),
};

const NIM: LanguageDescriptor = LanguageDescriptor {
    name: "Nim",
    line_markers: &["#"],
    block_delimiters: &[("#[", "]#")],
    nestable: true,
    string_quotes: &['"'],
    escape_char: Some('\\'),
};

const COFFEESCRIPT: LanguageDescriptor = LanguageDescriptor {
    name: "CoffeeScript",
    line_markers: &["#"],
    block_delimiters: &[("###", "###")],
    nestable: false,
    string_quotes: &['"', '\''],
    escape_char: Some('\\'),
};

const ERLANG: LanguageDescriptor = LanguageDescriptor {
    name: "Erlang",
    line_markers: &["%"],
    block_delimiters: &[],
    nestable: false,
    string_quotes: &['"'],
    escape_char: Some('\\'),
};

const LATEX: LanguageDescriptor = LanguageDescriptor {
    name: "TeX",
    line_markers: &["%"],
    block_delimiters: &[],
    nestable: false,
    string_quotes: &[],
    escape_char: None,
};

const CLOJURE: LanguageDescriptor = LanguageDescriptor {
    name: "Clojure",
    line_markers: &[";"],
    block_delimiters: &[],
    nestable: false,
    string_quotes: &['"'],
    escape_char: Some('\\'),
};

const LISP: LanguageDescriptor = LanguageDescriptor {
    name: "Lisp",
    line_markers: &[";"],
    block_delimiters: &[("#|", "|#")],
    nestable: true,
    string_quotes: &['"'],
    escape_char: Some('\\'),
};

const SCHEME: LanguageDescriptor = LanguageDescriptor {
    name: "Scheme",
    line_markers: &[";"],
    block_delimiters: &[("#|", "|#")],
    nestable: true,
    string_quotes: &['"'],
    escape_char: Some('\\'),
};

const ASSEMBLY: LanguageDescriptor = LanguageDescriptor {
    name: "Assembly",
    line_markers: &[";", "#"],
    block_delimiters: &[("/*", "*/")],
    nestable: false,
    string_quotes: &['"'],
    escape_char: Some('\\'),
};

const FORTRAN: LanguageDescriptor = LanguageDescriptor {
    name: "Fortran",
    line_markers: &["!"],
    block_delimiters: &[],
    nestable: false,
    string_quotes: &['"', '\''],
    escape_char: None,
};

const TERRAFORM: LanguageDescriptor = LanguageDescriptor {
    name: "Terraform",
    line_markers: &["#", "//"],
    block_delimiters: &[("/*", "*/")],
    nestable: false,
    string_quotes: &['"'],
    escape_char: Some('\\'),
};

const HTML: LanguageDescriptor = markup("HTML");
const XML: LanguageDescriptor = markup("XML");
const VUE: LanguageDescriptor = markup("Vue");
const SVELTE: LanguageDescriptor = markup("Svelte");

const CSS: LanguageDescriptor = LanguageDescriptor {
    name: "CSS",
    line_markers: &[],
    block_delimiters: &[("/*", "*/")],
    nestable: false,
    string_quotes: &['"', '\''],
    escape_char: Some('\\'),
};

const SCSS: LanguageDescriptor = LanguageDescriptor {
    name: "SCSS",
    line_markers: &["//"],
    block_delimiters: &[("/*", "*/")],
    nestable: false,
    string_quotes: &['"', '\''],
    escape_char: Some('\\'),
};

const LESS: LanguageDescriptor = LanguageDescriptor {
    name: "Less",
    line_markers: &["//"],
    block_delimiters: &[("/*", "*/")],
    nestable: false,
    string_quotes: &['"', '\''],
    escape_char: Some('\\'),
};

const JSON: LanguageDescriptor = LanguageDescriptor {
    name: "JSON",
    line_markers: &[],
    block_delimiters: &[],
    nestable: false,
    string_quotes: &['"'],
    escape_char: Some('\\'),
};

const MARKDOWN: LanguageDescriptor = LanguageDescriptor {
    name: "Markdown",
    line_markers: &[],
    block_delimiters: &[("<!--", "-->")],
    nestable: false,
    string_quotes: &[],
    escape_char: None,
};

const INI: LanguageDescriptor = LanguageDescriptor {
    name: "INI",
    line_markers: &[";", "#"],
    block_delimiters: &[],
    nestable: false,
    string_quotes: &[],
    escape_char: None,
};

/// Registration list: descriptor, extensions (lowercase), exact filenames.
///
/// Extensions may be multi-part (`blade.php`); the longest registered suffix
/// of a filename wins, so `page.blade.php` resolves to Blade, not PHP.
const REGISTRY: &[(
    &LanguageDescriptor,
    &[&str],         // extensions
    &[&str],         // exact filenames
)] = &[
    (&RUST, &["rs"], &[]),
    (&C, &["c", "h"], &[]),
    (&CPP, &["cpp", "cc", "cxx", "c++", "hpp", "hh", "hxx"], &[]),
    (&CSHARP, &["cs"], &[]),
    (&OBJC, &["m", "mm"], &[]),
    (&JAVA, &["java"], &[]),
    (&GO, &["go"], &[]),
    (&JAVASCRIPT, &["js", "mjs", "cjs", "jsx"], &[]),
    (&TYPESCRIPT, &["ts", "tsx", "mts", "cts"], &[]),
    (&DART, &["dart"], &[]),
    (&GROOVY, &["groovy", "gradle"], &[]),
    (&PROTOBUF, &["proto"], &[]),
    (&SWIFT, &["swift"], &[]),
    (&KOTLIN, &["kt", "kts"], &[]),
    (&SCALA, &["scala", "sc"], &[]),
    (&DLANG, &["d", "di"], &[]),
    (&ZIG, &["zig"], &[]),
    (&PYTHON, &["py", "pyw", "pyi"], &[]),
    (&SHELL, &["sh", "bash", "zsh", "ksh"], &[]),
    (&FISH, &["fish"], &[]),
    (&PERL, &["pl", "pm"], &[]),
    (&RUBY, &["rb", "rake"], &["Rakefile", "Gemfile"]),
    (&PHP, &["php"], &[]),
    (&BLADE, &["blade.php"], &[]),
    (&POWERSHELL, &["ps1", "psm1", "psd1"], &[]),
    (&BATCH, &["bat", "cmd"], &[]),
    (&VISUAL_BASIC, &["vb"], &[]),
    (&MAKEFILE, &["mk"], &["Makefile", "makefile", "GNUmakefile"]),
    (&DOCKERFILE, &[], &["Dockerfile"]),
    (&CMAKE, &["cmake"], &["CMakeLists.txt"]),
    (&YAML, &["yaml", "yml"], &[]),
    (&TOML, &["toml"], &[]),
    (&INI, &["ini", "cfg"], &[]),
    (&JSON, &["json"], &[]),
    (&MARKDOWN, &["md", "markdown"], &[]),
    (&HTML, &["html", "htm"], &[]),
    (&XML, &["xml", "xsl", "svg"], &[]),
    (&VUE, &["vue"], &[]),
    (&SVELTE, &["svelte"], &[]),
    (&CSS, &["css"], &[]),
    (&SCSS, &["scss", "sass"], &[]),
    (&LESS, &["less"], &[]),
    (&SQL, &["sql"], &[]),
    (&ADA, &["ada", "adb", "ads"], &[]),
    (&HASKELL, &["hs"], &[]),
    (&ELM, &["elm"], &[]),
    (&LUA, &["lua"], &[]),
    (&OCAML, &["ml", "mli"], &[]),
    (&FSHARP, &["fs", "fsi", "fsx"], &[]),
    (&PASCAL, &["pas", "pp"], &[]),
    (&JULIA, &["jl"], &[]),
    (&NIM, &["nim"], &[]),
    (&COFFEESCRIPT, &["coffee"], &[]),
    (&ERLANG, &["erl", "hrl"], &[]),
    (&LATEX, &["tex", "sty"], &[]),
    (&CLOJURE, &["clj", "cljs", "cljc"], &[]),
    (&LISP, &["lisp", "cl", "el"], &[]),
    (&SCHEME, &["scm", "ss"], &[]),
    (&ASSEMBLY, &["s", "asm"], &[]),
    (&FORTRAN, &["f", "f90", "f95", "f03"], &[]),
    (&TERRAFORM, &["tf"], &[]),
    (&TCL, &["tcl"], &[]),
    (&GRAPHQL, &["graphql", "gql"], &[]),
    (&ELIXIR, &["ex", "exs"], &[]),
    (&R, &["r"], &[]),
];

/// Lookup table from file name/extension to language descriptor.
pub struct LanguageTable {
    by_filename: HashMap<&'static str, &'static LanguageDescriptor>,
    by_extension: HashMap<&'static str, &'static LanguageDescriptor>,
    max_suffix_parts: usize,
}

static TABLE: OnceLock<LanguageTable> = OnceLock::new();

impl LanguageTable {
    /// The process-wide table, built on first use.
    pub fn global() -> &'static LanguageTable {
        TABLE.get_or_init(LanguageTable::build)
    }

    fn build() -> Self {
        let mut by_filename = HashMap::new();
        let mut by_extension = HashMap::new();
        let mut max_suffix_parts = 1;

        for (descriptor, extensions, filenames) in REGISTRY {
            for ext in *extensions {
                by_extension.insert(*ext, *descriptor);
                max_suffix_parts = max_suffix_parts.max(ext.matches('.').count() + 1);
            }
            for name in *filenames {
                by_filename.insert(*name, *descriptor);
            }
        }

        Self {
            by_filename,
            by_extension,
            max_suffix_parts,
        }
    }

    /// Resolve a path to its language descriptor.
    ///
    /// Exact filename match wins (`Makefile`), then the longest registered
    /// extension suffix (`blade.php` before `php`), case-insensitive on the
    /// extension. `None` means the file has no registered language and should
    /// be skipped, not treated as an error.
    pub fn resolve(&self, path: &Path) -> Option<&'static LanguageDescriptor> {
        let file_name = path.file_name()?.to_str()?;

        if let Some(descriptor) = self.by_filename.get(file_name) {
            return Some(descriptor);
        }

        let lower = file_name.to_lowercase();
        let parts: Vec<&str> = lower.split('.').collect();
        if parts.len() < 2 {
            return None;
        }

        // Try the longest suffix first: "page.blade.php" -> "blade.php", "php".
        let longest = parts.len().saturating_sub(self.max_suffix_parts).max(1);
        for start in longest..parts.len() {
            let suffix = parts[start..].join(".");
            if let Some(descriptor) = self.by_extension.get(suffix.as_str()) {
                return Some(descriptor);
            }
        }

        None
    }

    /// Number of registered languages (distinct descriptors).
    pub fn language_count(&self) -> usize {
        REGISTRY.len()
    }
}

/// Resolve a path against the global table.
pub fn resolve(path: &Path) -> Option<&'static LanguageDescriptor> {
    LanguageTable::global().resolve(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_extension() {
        assert_eq!(resolve(Path::new("src/main.rs")).unwrap().name, "Rust");
        assert_eq!(resolve(Path::new("lib/util.go")).unwrap().name, "Go");
        assert_eq!(resolve(Path::new("a/b/c/app.py")).unwrap().name, "Python");
    }

    #[test]
    fn test_resolve_case_insensitive_extension() {
        assert_eq!(resolve(Path::new("LEGACY.C")).unwrap().name, "C");
        assert_eq!(resolve(Path::new("Main.RS")).unwrap().name, "Rust");
    }

    #[test]
    fn test_resolve_by_filename() {
        assert_eq!(resolve(Path::new("project/Makefile")).unwrap().name, "Makefile");
        assert_eq!(resolve(Path::new("Dockerfile")).unwrap().name, "Dockerfile");
        assert_eq!(resolve(Path::new("Gemfile")).unwrap().name, "Ruby");
    }

    #[test]
    fn test_filename_wins_over_extension() {
        // CMakeLists.txt must hit the filename entry; ".txt" is unregistered.
        assert_eq!(
            resolve(Path::new("CMakeLists.txt")).unwrap().name,
            "CMake"
        );
    }

    #[test]
    fn test_longest_suffix_wins() {
        assert_eq!(resolve(Path::new("page.blade.php")).unwrap().name, "Blade");
        assert_eq!(resolve(Path::new("index.php")).unwrap().name, "PHP");
    }

    #[test]
    fn test_unknown_extension() {
        assert!(resolve(Path::new("data.xyz")).is_none());
        assert!(resolve(Path::new("no_extension")).is_none());
    }

    #[test]
    fn test_table_has_forty_plus_languages() {
        assert!(LanguageTable::global().language_count() >= 40);
    }

    #[test]
    fn test_nestable_flags() {
        assert!(resolve(Path::new("a.rs")).unwrap().nestable);
        assert!(resolve(Path::new("a.hs")).unwrap().nestable);
        assert!(!resolve(Path::new("a.c")).unwrap().nestable);
    }
}
