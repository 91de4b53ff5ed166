//! Определение языка программирования по тексту
//!
//! Эвристика: для каждой строки проверяются взвешенные регулярные выражения,
//! очки суммируются по языкам, побеждает язык с максимальной суммой.
//! Если ничего не совпало, результат `Language::Unknown`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Язык исходного кода
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    C,
    Cpp,
    CSharp,
    Clojure,
    Css,
    Dockerfile,
    Elixir,
    Go,
    Html,
    Java,
    Javascript,
    Julia,
    Kotlin,
    Lua,
    Markdown,
    Pascal,
    Php,
    Python,
    Ruby,
    Rust,
    Sql,
    Typescript,
    Yaml,
    #[default]
    Unknown,
}

impl Language {
    /// Все распознаваемые языки (без `Unknown`), порядок определяет приоритет при равенстве очков
    pub const ALL: [Language; 23] = [
        Language::C,
        Language::Cpp,
        Language::CSharp,
        Language::Clojure,
        Language::Css,
        Language::Dockerfile,
        Language::Elixir,
        Language::Go,
        Language::Html,
        Language::Java,
        Language::Javascript,
        Language::Julia,
        Language::Kotlin,
        Language::Lua,
        Language::Markdown,
        Language::Pascal,
        Language::Php,
        Language::Python,
        Language::Ruby,
        Language::Rust,
        Language::Sql,
        Language::Typescript,
        Language::Yaml,
    ];

    /// Метка для отображения ("Programming Language Detected: ...")
    pub fn label(self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cpp => "C++",
            Language::CSharp => "C#",
            Language::Clojure => "Clojure",
            Language::Css => "CSS",
            Language::Dockerfile => "Dockerfile",
            Language::Elixir => "Elixir",
            Language::Go => "Go",
            Language::Html => "HTML",
            Language::Java => "Java",
            Language::Javascript => "Javascript",
            Language::Julia => "Julia",
            Language::Kotlin => "Kotlin",
            Language::Lua => "Lua",
            Language::Markdown => "Markdown",
            Language::Pascal => "Pascal",
            Language::Php => "PHP",
            Language::Python => "Python",
            Language::Ruby => "Ruby",
            Language::Rust => "Rust",
            Language::Sql => "SQL",
            Language::Typescript => "Typescript",
            Language::Yaml => "YAML",
            Language::Unknown => "Unknown",
        }
    }

    /// Поиск по метке без учёта регистра; неизвестная метка даёт `Unknown`
    pub fn from_label(label: &str) -> Language {
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.label().eq_ignore_ascii_case(label.trim()))
            .unwrap_or(Language::Unknown)
    }

    /// Расширение файла для скачивания результата
    pub fn extension(self) -> &'static str {
        match self {
            Language::C => ".c",
            Language::Cpp => ".cpp",
            Language::CSharp => ".cs",
            Language::Clojure => ".clj",
            Language::Css => ".css",
            Language::Dockerfile => ".dockerfile",
            Language::Elixir => ".ex",
            Language::Go => ".go",
            Language::Html => ".html",
            Language::Java => ".java",
            Language::Javascript => ".js",
            Language::Julia => ".jl",
            Language::Kotlin => ".kt",
            Language::Lua => ".lua",
            Language::Markdown => ".md",
            Language::Pascal => ".pas",
            Language::Php => ".php",
            Language::Python => ".py",
            Language::Ruby => ".rb",
            Language::Rust => ".rs",
            Language::Sql => ".sql",
            Language::Typescript => ".ts",
            Language::Yaml => ".yaml",
            Language::Unknown => ".txt",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Значение атрибута `accept` для выбора файла
pub fn accept_filter() -> String {
    let mut extensions: Vec<&str> = Language::ALL.iter().map(|l| l.extension()).collect();
    extensions.push(Language::Unknown.extension());
    extensions.join(",")
}

/// (язык, регулярное выражение для одной строки, вес)
const PATTERNS: &[(Language, &str, i32)] = &[
    // C
    (Language::C, r"^\s*#include\s*<\w+\.h>", 5),
    (Language::C, r"\bprintf\s*\(", 3),
    (Language::C, r"\bmalloc\s*\(", 3),
    (Language::C, r"\bint\s+main\s*\(", 2),
    // C++
    (Language::Cpp, r"^\s*#include\s*<\w+>", 5),
    (Language::Cpp, r"\bstd::", 5),
    (Language::Cpp, r"\bcout\s*<<", 5),
    (Language::Cpp, r"\btemplate\s*<", 5),
    (Language::Cpp, r"\bint\s+main\s*\(", 2),
    // C#
    (Language::CSharp, r"^\s*using\s+System", 5),
    (Language::CSharp, r"\bConsole\.Write(Line)?\s*\(", 5),
    (Language::CSharp, r"\{\s*get;", 5),
    (Language::CSharp, r"^\s*namespace\s+[\w.]+\s*$", 3),
    // Clojure
    (Language::Clojure, r"^\s*\(defn-?\s", 10),
    (Language::Clojure, r"^\s*\(ns\s", 10),
    (Language::Clojure, r"^\s*\(def\s", 5),
    (Language::Clojure, r"\(println\s", 3),
    // CSS
    (Language::Css, r"^\s*[.#][\w-]+[^{;]*\{\s*$", 5),
    (Language::Css, r"^\s*(body|html|div|span|h[1-6])\s*\{", 5),
    (Language::Css, r"^\s*[a-z-]+\s*:\s*[^;{}]*\d(px|em|rem|vh|vw|%)", 3),
    (Language::Css, r"^\s*[a-z-]+\s*:\s*#[0-9a-fA-F]{3,6}\s*;", 3),
    (Language::Css, r"^\s*@media\b", 5),
    // Dockerfile
    (Language::Dockerfile, r"^FROM\s+[\w./-]+(:[\w.-]+)?(\s+AS\s+\w+)?\s*$", 5),
    (Language::Dockerfile, r"^(RUN|CMD|COPY|ADD|ENTRYPOINT|WORKDIR|EXPOSE|ENV|ARG)\s", 5),
    // Elixir
    (Language::Elixir, r"^\s*defmodule\s+[\w.]+\s+do\s*$", 10),
    (Language::Elixir, r"^\s*defp?\s+\w+.*\bdo\s*$", 5),
    (Language::Elixir, r"\|>", 5),
    (Language::Elixir, r"\bIO\.puts\b", 5),
    // Go
    (Language::Go, r"^\s*package\s+\w+\s*$", 5),
    (Language::Go, r"\bfunc\s+(\(\w+\s+\*?\w+\)\s*)?\w+\s*\(", 5),
    (Language::Go, r"\bfmt\.\w+\(", 5),
    (Language::Go, r"\w\s*:=\s*", 3),
    // HTML
    (Language::Html, r"(?i)<!DOCTYPE\s+html>", 10),
    (Language::Html, r"<(html|head|body|div|span|p|a|ul|li|script|style)(\s[^>]*)?>", 3),
    (Language::Html, r"</(html|head|body|div|span|p|a|ul|li|script|style)>", 2),
    // Java
    (Language::Java, r"\bpublic\s+(static\s+)?(final\s+)?(class|void|interface)\b", 5),
    (Language::Java, r"\bSystem\.out\.print", 5),
    (Language::Java, r"^\s*import\s+java\.", 5),
    (Language::Java, r"\bString\[\]\s+\w+", 5),
    (Language::Java, r"^\s*package\s+[\w.]+;", 5),
    // Javascript
    (Language::Javascript, r"\bconsole\.log\s*\(", 5),
    (Language::Javascript, r"\bfunction\s+\w+\s*\(", 2),
    (Language::Javascript, r"\b(const|let|var)\s+\w+\s*=", 3),
    (Language::Javascript, r"=>", 2),
    (Language::Javascript, r"\brequire\s*\(", 3),
    (Language::Javascript, r"\b(document|window)\.\w+", 3),
    (Language::Javascript, r"^\s*export\s+default\b", 3),
    // Julia
    (Language::Julia, r"^\s*using\s+[A-Z]\w*\s*$", 5),
    (Language::Julia, r"\w::(Int|Float64|String|Bool)\w*", 5),
    (Language::Julia, r"\bprintln\(", 2),
    // Kotlin
    (Language::Kotlin, r"\bfun\s+\w+\s*\(", 5),
    (Language::Kotlin, r"\bval\s+\w+", 3),
    (Language::Kotlin, r"\bdata\s+class\b", 5),
    // Lua
    (Language::Lua, r"\blocal\s+\w+\s*=", 5),
    (Language::Lua, r"\blocal\s+function\b", 5),
    (Language::Lua, r"\bthen\s*$", 2),
    (Language::Lua, r"~=", 3),
    // Markdown
    (Language::Markdown, r"^#{1,6}\s+[A-Z]", 2),
    (Language::Markdown, r"^\s*[-*]\s+\[[ xX]\]", 5),
    (Language::Markdown, r"\[[^\]]+\]\(https?://", 5),
    (Language::Markdown, r"^```", 5),
    // Pascal
    (Language::Pascal, r"(?i)^\s*program\s+\w+\s*;", 10),
    (Language::Pascal, r"(?i)^\s*(begin|end\.?;?)\s*$", 3),
    (Language::Pascal, r"(?i)\bprocedure\s+\w+", 5),
    (Language::Pascal, r"(?i)\bwriteln\s*\(", 5),
    // PHP
    (Language::Php, r"<\?php", 10),
    (Language::Php, r"\$\w+\s*=", 3),
    (Language::Php, r"\becho\s", 3),
    // Python
    (Language::Python, r"^\s*def\s+\w+\s*\(.*\)\s*(->\s*[\w\[\], .]+)?:\s*$", 5),
    (Language::Python, r"^\s*(from\s+[\w.]+\s+)?import\s+[\w.]+(\s+as\s+\w+)?\s*$", 3),
    (Language::Python, r"__name__\s*==\s*.__main__.", 5),
    (Language::Python, r"^\s*print\(", 2),
    (Language::Python, r"\bself\.\w+", 2),
    (Language::Python, r"^\s*(elif|else|try|except|finally)\b.*:\s*$", 2),
    // Ruby
    (Language::Ruby, r"^\s*def\s+\w+[?!]?(\s*\(.*\))?\s*$", 5),
    (Language::Ruby, r"^\s*end\s*$", 2),
    (Language::Ruby, r"^\s*puts\s", 5),
    (Language::Ruby, r"\battr_(accessor|reader|writer)\b", 5),
    (Language::Ruby, r"\.each\s+do\s*\|", 5),
    (Language::Ruby, r"^\s*require\s+'", 3),
    // Rust
    (Language::Rust, r"\bfn\s+\w+\s*(<[^>]*>)?\s*\(", 5),
    (Language::Rust, r"\blet\s+mut\b", 5),
    (Language::Rust, r"\b\w+!\(", 3),
    (Language::Rust, r"^\s*use\s+\w+(::\w+)+", 5),
    (Language::Rust, r"\bimpl\b", 3),
    (Language::Rust, r"\bpub\s+(fn|struct|enum|mod|trait)\b", 5),
    (Language::Rust, r"&mut\s", 2),
    // SQL
    (Language::Sql, r"(?i)^\s*SELECT\b", 5),
    (Language::Sql, r"(?i)^\s*INSERT\s+INTO\b", 5),
    (Language::Sql, r"(?i)^\s*CREATE\s+(TABLE|INDEX|VIEW)\b", 5),
    (Language::Sql, r"(?i)^\s*UPDATE\s+\w+\s+SET\b", 5),
    (Language::Sql, r"(?i)^\s*DELETE\s+FROM\b", 5),
    (Language::Sql, r"(?i)\bFROM\s+\w+", 2),
    (Language::Sql, r"(?i)\bWHERE\b", 2),
    // Typescript
    (Language::Typescript, r"^\s*(export\s+)?interface\s+\w+", 5),
    (Language::Typescript, r"\w\s*:\s*(string|number|boolean|any|void|unknown)\b", 5),
    (Language::Typescript, r"^\s*(export\s+)?type\s+\w+\s*=", 5),
    (Language::Typescript, r"\b(const|let)\s+\w+\s*:\s*\w+", 3),
    // YAML
    (Language::Yaml, r"^---\s*$", 5),
    (Language::Yaml, r"^\s*-\s+[\w-]+:\s", 3),
    (Language::Yaml, r"^[\w-]+:\s*$", 2),
    (Language::Yaml, r"^\s*[\w-]+:\s+[^;{}()]+$", 1),
];

static COMPILED: Lazy<Vec<(Language, Regex, i32)>> = Lazy::new(|| {
    PATTERNS
        .iter()
        .filter_map(|(lang, pattern, weight)| {
            Regex::new(pattern).ok().map(|re| (*lang, re, *weight))
        })
        .collect()
});

/// Очки каждого языка для текста, в порядке `Language::ALL`
fn score_languages(text: &str) -> Vec<(Language, i32)> {
    let mut scores: Vec<(Language, i32)> = Language::ALL.iter().map(|l| (*l, 0)).collect();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        for (lang, re, weight) in COMPILED.iter() {
            if re.is_match(line) {
                if let Some(entry) = scores.iter_mut().find(|(l, _)| l == lang) {
                    entry.1 += weight;
                }
            }
        }
    }
    scores
}

/// Лучшее предположение о языке текста
pub fn detect_language(text: &str) -> Language {
    if text.trim().is_empty() {
        return Language::Unknown;
    }
    let mut best = (Language::Unknown, 0);
    for (lang, score) in score_languages(text) {
        if score > best.1 {
            best = (lang, score);
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(COMPILED.len(), PATTERNS.len());
    }

    #[test]
    fn test_empty_and_prose_are_unknown() {
        assert_eq!(detect_language(""), Language::Unknown);
        assert_eq!(detect_language("   \n "), Language::Unknown);
        assert_eq!(detect_language("hello world"), Language::Unknown);
        assert_eq!(detect_language("just some plain words here"), Language::Unknown);
    }

    #[test]
    fn test_detect_rust() {
        let code = "fn main() {\n    let mut count = 0;\n    println!(\"{}\", count);\n}\n";
        assert_eq!(detect_language(code), Language::Rust);
    }

    #[test]
    fn test_detect_python() {
        let code = "def greet(name):\n    print(f\"Hello, {name}\")\n\nif __name__ == \"__main__\":\n    greet(\"world\")\n";
        assert_eq!(detect_language(code), Language::Python);
        assert_eq!(detect_language("print('hi')"), Language::Python);
    }

    #[test]
    fn test_detect_sql() {
        let code = "SELECT id, name\nFROM users\nWHERE id = 1;";
        assert_eq!(detect_language(code), Language::Sql);
    }

    #[test]
    fn test_detect_typescript_over_javascript() {
        let code = "interface User {\n  name: string;\n}\nconst greet = (user: User): string => `hi ${user.name}`;";
        assert_eq!(detect_language(code), Language::Typescript);
    }

    #[test]
    fn test_detect_go() {
        let code = "package main\n\nimport \"fmt\"\n\nfunc main() {\n\tx := 1\n\tfmt.Println(x)\n}";
        assert_eq!(detect_language(code), Language::Go);
    }

    #[test]
    fn test_detect_html() {
        let code = "<!DOCTYPE html>\n<html>\n<body>\n<p>Hi</p>\n</body>\n</html>";
        assert_eq!(detect_language(code), Language::Html);
    }

    #[test]
    fn test_extension_lookup() {
        assert_eq!(Language::from_label("Rust").extension(), ".rs");
        assert_eq!(Language::from_label("python").extension(), ".py");
        assert_eq!(Language::from_label("unknown").extension(), ".txt");
        assert_eq!(Language::from_label("Brainfuck").extension(), ".txt");
    }

    #[test]
    fn test_label_roundtrip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_label(lang.label()), lang);
        }
        assert_eq!(Language::from_label("Unknown"), Language::Unknown);
    }

    #[test]
    fn test_accept_filter_lists_every_extension() {
        let accept = accept_filter();
        assert!(accept.starts_with(".c,.cpp,"));
        assert!(accept.ends_with(".txt"));
        assert_eq!(accept.split(',').count(), Language::ALL.len() + 1);
    }
}
