//! Подсветка синтаксиса для панели результата
//!
//! Однопроходный лексер: комментарии, строки, числа и ключевые слова
//! оборачиваются в `<span class="code-...">`, весь остальной текст
//! экранируется. Результат вставляется через `inner_html`.

use contracts::usecases::u601_generate_docs::Language;

/// Правила подсветки одного языка
struct Syntax {
    line_comments: &'static [&'static str],
    block_comment: Option<(&'static str, &'static str)>,
    quotes: &'static [char],
    keywords: &'static [&'static str],
    case_insensitive: bool,
}

const C_LIKE_COMMENTS: &[&str] = &["//"];
const C_BLOCK: Option<(&str, &str)> = Some(("/*", "*/"));
const HASH_COMMENTS: &[&str] = &["#"];

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "define", "do", "double",
    "else", "enum", "extern", "float", "for", "goto", "if", "include", "int", "long", "return",
    "short", "signed", "sizeof", "static", "struct", "switch", "typedef", "union", "unsigned",
    "void", "volatile", "while",
];

const CPP_KEYWORDS: &[&str] = &[
    "auto", "bool", "break", "case", "catch", "char", "class", "const", "constexpr", "continue",
    "default", "define", "delete", "do", "double", "else", "enum", "false", "float", "for",
    "if", "include", "int", "long", "namespace", "new", "nullptr", "private", "protected",
    "public", "return", "static", "struct", "switch", "template", "this", "throw", "true", "try",
    "typename", "using", "virtual", "void", "while",
];

const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "async", "await", "bool", "break", "case", "catch", "class", "const", "else",
    "enum", "false", "for", "foreach", "if", "in", "int", "interface", "internal", "namespace",
    "new", "null", "override", "private", "protected", "public", "readonly", "return", "static",
    "string", "struct", "switch", "this", "throw", "true", "try", "using", "var", "virtual",
    "void", "while",
];

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "boolean", "break", "case", "catch", "class", "else", "extends", "false",
    "final", "finally", "for", "if", "implements", "import", "int", "interface", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "throws", "true", "try", "void", "while",
];

const KOTLIN_KEYWORDS: &[&str] = &[
    "class", "data", "else", "false", "for", "fun", "if", "import", "in", "interface", "is",
    "null", "object", "override", "package", "private", "return", "this", "true", "val", "var",
    "when", "while",
];

const JS_KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "else", "export", "extends",
    "false", "for", "from", "function", "if", "import", "let", "new", "null", "of", "return",
    "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "while",
];

const TS_KEYWORDS: &[&str] = &[
    "any", "as", "async", "await", "boolean", "break", "case", "catch", "class", "const",
    "else", "enum", "export", "extends", "false", "for", "from", "function", "if",
    "implements", "import", "interface", "let", "new", "null", "number", "private", "public",
    "readonly", "return", "string", "this", "throw", "true", "try", "type", "undefined", "void",
    "while",
];

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "false", "for",
    "func", "go", "if", "import", "interface", "map", "nil", "package", "range", "return",
    "select", "struct", "switch", "true", "type", "var",
];

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "and", "as", "async", "await", "break", "class", "continue", "def", "del", "elif", "else",
    "except", "False", "finally", "for", "from", "if", "import", "in", "is", "lambda", "None",
    "not", "or", "pass", "raise", "return", "True", "try", "while", "with", "yield",
];

const RUBY_KEYWORDS: &[&str] = &[
    "begin", "class", "def", "do", "else", "elsif", "end", "ensure", "false", "if", "module",
    "nil", "puts", "require", "rescue", "return", "self", "true", "unless", "until", "while",
    "yield",
];

const ELIXIR_KEYWORDS: &[&str] = &[
    "case", "cond", "def", "defmodule", "defp", "do", "else", "end", "false", "fn", "if",
    "import", "nil", "true", "use", "when", "with",
];

const JULIA_KEYWORDS: &[&str] = &[
    "begin", "break", "continue", "else", "elseif", "end", "false", "for", "function", "if",
    "import", "let", "local", "module", "nothing", "return", "struct", "true", "using", "while",
];

const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

const PHP_KEYWORDS: &[&str] = &[
    "array", "class", "echo", "else", "elseif", "extends", "false", "foreach", "function",
    "if", "namespace", "new", "null", "private", "public", "require", "return", "static",
    "this", "true", "use", "while",
];

const PASCAL_KEYWORDS: &[&str] = &[
    "begin", "const", "do", "else", "end", "for", "function", "if", "integer", "procedure",
    "program", "record", "repeat", "string", "then", "to", "type", "until", "uses", "var",
    "while",
];

const CLOJURE_KEYWORDS: &[&str] = &[
    "def", "defn", "defmacro", "do", "fn", "if", "let", "loop", "ns", "nil", "recur", "when",
];

const SQL_KEYWORDS: &[&str] = &[
    "alter", "and", "as", "by", "create", "delete", "distinct", "drop", "from", "group",
    "having", "in", "inner", "insert", "into", "is", "join", "left", "like", "limit", "not",
    "null", "on", "or", "order", "right", "select", "set", "table", "union", "update",
    "values", "where",
];

const DOCKERFILE_KEYWORDS: &[&str] = &[
    "ADD", "ARG", "CMD", "COPY", "ENTRYPOINT", "ENV", "EXPOSE", "FROM", "LABEL", "RUN", "USER",
    "VOLUME", "WORKDIR",
];

const CSS_KEYWORDS: &[&str] = &["important", "media", "import", "keyframes"];

const YAML_KEYWORDS: &[&str] = &["true", "false", "null", "yes", "no"];

impl Syntax {
    fn for_language(language: Language) -> Syntax {
        let c_like = |keywords| Syntax {
            line_comments: C_LIKE_COMMENTS,
            block_comment: C_BLOCK,
            quotes: &['"', '\''],
            keywords,
            case_insensitive: false,
        };
        let hash = |keywords| Syntax {
            line_comments: HASH_COMMENTS,
            block_comment: None,
            quotes: &['"', '\''],
            keywords,
            case_insensitive: false,
        };

        match language {
            Language::C => c_like(C_KEYWORDS),
            Language::Cpp => c_like(CPP_KEYWORDS),
            Language::CSharp => c_like(CSHARP_KEYWORDS),
            Language::Java => c_like(JAVA_KEYWORDS),
            Language::Kotlin => c_like(KOTLIN_KEYWORDS),
            Language::Javascript => Syntax {
                quotes: &['"', '\'', '`'],
                ..c_like(JS_KEYWORDS)
            },
            Language::Typescript => Syntax {
                quotes: &['"', '\'', '`'],
                ..c_like(TS_KEYWORDS)
            },
            Language::Go => Syntax {
                quotes: &['"', '`'],
                ..c_like(GO_KEYWORDS)
            },
            // одинарная кавычка в Rust чаще lifetime, чем char
            Language::Rust => Syntax {
                quotes: &['"'],
                ..c_like(RUST_KEYWORDS)
            },
            Language::Php => Syntax {
                line_comments: &["//", "#"],
                ..c_like(PHP_KEYWORDS)
            },
            Language::Css => Syntax {
                line_comments: &[],
                ..c_like(CSS_KEYWORDS)
            },
            Language::Python => hash(PYTHON_KEYWORDS),
            Language::Ruby => hash(RUBY_KEYWORDS),
            Language::Elixir => hash(ELIXIR_KEYWORDS),
            Language::Yaml => hash(YAML_KEYWORDS),
            Language::Dockerfile => hash(DOCKERFILE_KEYWORDS),
            Language::Julia => Syntax {
                block_comment: Some(("#=", "=#")),
                ..hash(JULIA_KEYWORDS)
            },
            Language::Lua => Syntax {
                line_comments: &["--"],
                block_comment: Some(("--[[", "]]")),
                quotes: &['"', '\''],
                keywords: LUA_KEYWORDS,
                case_insensitive: false,
            },
            Language::Sql => Syntax {
                line_comments: &["--"],
                block_comment: C_BLOCK,
                quotes: &['\''],
                keywords: SQL_KEYWORDS,
                case_insensitive: true,
            },
            Language::Pascal => Syntax {
                line_comments: &["//"],
                block_comment: Some(("{", "}")),
                quotes: &['\''],
                keywords: PASCAL_KEYWORDS,
                case_insensitive: true,
            },
            Language::Clojure => Syntax {
                line_comments: &[";"],
                block_comment: None,
                quotes: &['"'],
                keywords: CLOJURE_KEYWORDS,
                case_insensitive: false,
            },
            Language::Html => Syntax {
                line_comments: &[],
                block_comment: Some(("<!--", "-->")),
                quotes: &['"', '\''],
                keywords: &[],
                case_insensitive: false,
            },
            Language::Markdown | Language::Unknown => Syntax {
                line_comments: &[],
                block_comment: None,
                quotes: &[],
                keywords: &[],
                case_insensitive: false,
            },
        }
    }

    fn is_keyword(&self, word: &str) -> bool {
        if self.case_insensitive {
            self.keywords.iter().any(|k| k.eq_ignore_ascii_case(word))
        } else {
            self.keywords.contains(&word)
        }
    }
}

/// Подсветить код как HTML для вставки в `<pre><code>`
pub fn highlight_code(code: &str, language: Language) -> String {
    let syntax = Syntax::for_language(language);
    let mut out = String::with_capacity(code.len() * 2);
    let mut i = 0;

    while i < code.len() {
        let rest = &code[i..];

        if let Some((open, close)) = syntax.block_comment {
            if rest.starts_with(open) {
                let end = rest[open.len()..]
                    .find(close)
                    .map(|pos| open.len() + pos + close.len())
                    .unwrap_or(rest.len());
                push_span(&mut out, "code-comment", &rest[..end]);
                i += end;
                continue;
            }
        }

        if syntax.line_comments.iter().any(|m| rest.starts_with(m)) {
            let end = rest.find('\n').unwrap_or(rest.len());
            push_span(&mut out, "code-comment", &rest[..end]);
            i += end;
            continue;
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };

        if syntax.quotes.contains(&ch) {
            let end = string_end(rest, ch);
            push_span(&mut out, "code-string", &rest[..end]);
            i += end;
        } else if ch.is_ascii_digit() {
            let end = token_end(rest, |c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
            push_span(&mut out, "code-number", &rest[..end]);
            i += end;
        } else if ch.is_alphabetic() || ch == '_' {
            let end = token_end(rest, |c| c.is_alphanumeric() || c == '_');
            let word = &rest[..end];
            if syntax.is_keyword(word) {
                push_span(&mut out, "code-keyword", word);
            } else {
                out.push_str(&html_escape(word));
            }
            i += end;
        } else {
            out.push_str(&html_escape(&rest[..ch.len_utf8()]));
            i += ch.len_utf8();
        }
    }

    out
}

/// Длина строкового литерала с кавычками. Незакрытая строка заканчивается на конце строки текста.
fn string_end(rest: &str, quote: char) -> usize {
    let mut escaped = false;
    for (pos, c) in rest.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return pos + c.len_utf8();
        } else if c == '\n' {
            return pos;
        }
    }
    rest.len()
}

fn token_end(rest: &str, accept: impl Fn(char) -> bool) -> usize {
    rest.char_indices()
        .find(|&(_, c)| !accept(c))
        .map(|(pos, _)| pos)
        .unwrap_or(rest.len())
}

fn push_span(out: &mut String, class: &str, text: &str) {
    out.push_str("<span class=\"");
    out.push_str(class);
    out.push_str("\">");
    out.push_str(&html_escape(text));
    out.push_str("</span>");
}

/// Simple HTML escape
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Обратное преобразование: убрать теги и раскрыть сущности
    fn to_plain_text(html: &str) -> String {
        let mut clean = String::new();
        let mut in_tag = false;
        for ch in html.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => clean.push(ch),
                _ => {}
            }
        }
        clean
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&")
    }

    #[test]
    fn test_rust_keywords_strings_and_comments() {
        let html = highlight_code("fn main() { let s = \"hi\"; } // done", Language::Rust);
        assert!(html.contains("<span class=\"code-keyword\">fn</span>"));
        assert!(html.contains("<span class=\"code-keyword\">let</span>"));
        assert!(html.contains("<span class=\"code-string\">&quot;hi&quot;</span>"));
        assert!(html.contains("<span class=\"code-comment\">// done</span>"));
    }

    #[test]
    fn test_keyword_inside_identifier_is_not_highlighted() {
        let html = highlight_code("format(iffy)", Language::Rust);
        assert!(!html.contains("code-keyword"));
        assert_eq!(html, "format(iffy)");
    }

    #[test]
    fn test_escapes_markup() {
        let html = highlight_code("<script>alert(1)</script>", Language::Unknown);
        assert_eq!(html, "&lt;script&gt;alert(1)&lt;/script&gt;");
    }

    #[test]
    fn test_python_hash_comment_and_escaped_quote() {
        let html = highlight_code("x = 'it\\'s'  # note", Language::Python);
        assert!(html.contains("<span class=\"code-string\">&#39;it\\&#39;s&#39;</span>"));
        assert!(html.contains("<span class=\"code-comment\"># note</span>"));
    }

    #[test]
    fn test_sql_keywords_are_case_insensitive() {
        let html = highlight_code("select id FROM users -- all", Language::Sql);
        assert!(html.contains("<span class=\"code-keyword\">select</span>"));
        assert!(html.contains("<span class=\"code-keyword\">FROM</span>"));
        assert!(html.contains("<span class=\"code-comment\">-- all</span>"));
    }

    #[test]
    fn test_block_comment_and_numbers() {
        let html = highlight_code("/* a\nb */ int x = 42;", Language::C);
        assert!(html.contains("<span class=\"code-comment\">/* a\nb */</span>"));
        assert!(html.contains("<span class=\"code-number\">42</span>"));
    }

    #[test]
    fn test_unterminated_string_stops_at_line_end() {
        let html = highlight_code("s = \"open\nreturn 1", Language::Python);
        assert!(html.contains("<span class=\"code-string\">&quot;open</span>\n"));
        assert!(html.contains("<span class=\"code-keyword\">return</span>"));
    }

    #[test]
    fn test_text_is_preserved_for_every_language() {
        let sample = "fn <T> main() { x = 'a' & \"b\" } // ü\n# -- /* ; {c} <!-- d -->\n3.14";
        for language in Language::ALL.iter().copied().chain([Language::Unknown]) {
            let html = highlight_code(sample, language);
            assert_eq!(to_plain_text(&html), sample, "language {}", language);
        }
    }
}
