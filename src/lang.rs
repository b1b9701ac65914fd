//! Language table for copy-paste detection.
//!
//! Each entry carries the comment syntax the statement builder needs and the
//! per-language minimum clone size (in statements) applied before a clone
//! group is reported. One language is marked `upstream_filtered`: its
//! tokenizer applies its own minimum-size filtering, so the executor must
//! not filter its groups again.

use std::path::Path;

/// Default minimum clone size in statements for languages without an override.
pub const DEFAULT_MIN_TOKENS: usize = 10;

#[derive(Debug)]
pub struct Lang {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub filenames: &'static [&'static str],
    pub line_comments: &'static [&'static str],
    pub block_comment: Option<(&'static str, &'static str)>,
    pub nested_block_comments: bool,
    /// Minimum clone size in statements before a group is reported.
    pub min_tokens: usize,
    /// Minimum-size filtering is done by this language's own tokenizer;
    /// the executor must not re-apply it.
    pub upstream_filtered: bool,
}

macro_rules! c_like {
    ($name:expr, $exts:expr) => {
        Lang {
            name: $name,
            extensions: $exts,
            filenames: &[],
            line_comments: &["//"],
            block_comment: Some(("/*", "*/")),
            nested_block_comments: false,
            min_tokens: DEFAULT_MIN_TOKENS,
            upstream_filtered: false,
        }
    };
}

macro_rules! hash_line {
    ($name:expr, $exts:expr) => {
        hash_line!($name, $exts, &[])
    };
    ($name:expr, $exts:expr, $files:expr) => {
        Lang {
            name: $name,
            extensions: $exts,
            filenames: $files,
            line_comments: &["#"],
            block_comment: None,
            nested_block_comments: false,
            min_tokens: DEFAULT_MIN_TOKENS,
            upstream_filtered: false,
        }
    };
}

pub fn languages() -> &'static [Lang] {
    static LANGUAGES: &[Lang] = &[
        Lang {
            nested_block_comments: true,
            ..c_like!("Rust", &["rs"])
        },
        hash_line!("Python", &["py", "pyi"]),
        c_like!("JavaScript", &["js", "mjs", "cjs", "jsx"]),
        c_like!("TypeScript", &["ts", "mts", "cts", "tsx"]),
        c_like!("Java", &["java"]),
        c_like!("C", &["c", "h"]),
        c_like!("C++", &["cpp", "cxx", "cc", "hpp", "hxx"]),
        Lang {
            // C# duplications are size-filtered by its own tokenizer.
            upstream_filtered: true,
            ..c_like!("C#", &["cs"])
        },
        c_like!("Go", &["go"]),
        Lang {
            nested_block_comments: true,
            ..c_like!("Kotlin", &["kt", "kts"])
        },
        Lang {
            nested_block_comments: true,
            ..c_like!("Swift", &["swift"])
        },
        Lang {
            nested_block_comments: true,
            ..c_like!("Scala", &["scala", "sc"])
        },
        c_like!("PHP", &["php"]),
        c_like!("Dart", &["dart"]),
        c_like!("Groovy", &["groovy", "gradle"]),
        c_like!("Objective-C", &["m", "mm"]),
        c_like!("Zig", &["zig"]),
        hash_line!("Ruby", &["rb"], &["Rakefile", "Gemfile"]),
        hash_line!("Shell", &["sh", "bash", "zsh"]),
        hash_line!("Perl", &["pl", "pm"]),
        hash_line!("R", &["r", "R"]),
        hash_line!("Elixir", &["ex", "exs"]),
        hash_line!("YAML", &["yaml", "yml"]),
        hash_line!("Dockerfile", &[], &["Dockerfile"]),
        hash_line!("Makefile", &["mk"], &["Makefile", "makefile", "GNUmakefile"]),
        Lang {
            name: "SQL",
            extensions: &["sql"],
            filenames: &[],
            line_comments: &["--"],
            block_comment: Some(("/*", "*/")),
            nested_block_comments: false,
            min_tokens: DEFAULT_MIN_TOKENS,
            upstream_filtered: false,
        },
        Lang {
            name: "Lua",
            extensions: &["lua"],
            filenames: &[],
            line_comments: &["--"],
            block_comment: Some(("--[[", "]]")),
            nested_block_comments: false,
            min_tokens: DEFAULT_MIN_TOKENS,
            upstream_filtered: false,
        },
        Lang {
            name: "CSS",
            extensions: &["css", "scss", "less"],
            filenames: &[],
            line_comments: &[],
            block_comment: Some(("/*", "*/")),
            nested_block_comments: false,
            min_tokens: 30,
            upstream_filtered: false,
        },
        Lang {
            name: "HTML",
            extensions: &["html", "htm"],
            filenames: &[],
            line_comments: &[],
            block_comment: Some(("<!--", "-->")),
            nested_block_comments: false,
            min_tokens: 30,
            upstream_filtered: false,
        },
        Lang {
            name: "XML",
            extensions: &["xml", "xsl", "xslt", "svg", "csproj", "fsproj", "xaml"],
            filenames: &[],
            line_comments: &[],
            block_comment: Some(("<!--", "-->")),
            nested_block_comments: false,
            min_tokens: 30,
            upstream_filtered: false,
        },
    ];
    LANGUAGES
}

/// Detect a language by special filename first, then by extension.
pub fn detect(path: &Path) -> Option<&'static Lang> {
    let file_name = path.file_name()?.to_str()?;

    for lang in languages() {
        if lang.filenames.contains(&file_name) {
            return Some(lang);
        }
    }

    let ext = path.extension()?.to_str()?;
    languages().iter().find(|l| l.extensions.contains(&ext))
}

#[cfg(test)]
#[path = "lang_test.rs"]
mod tests;
