//! 纯文本渲染 - 链接语法与多行正文预览

/// 预览默认分隔符
pub const DEFAULT_SEPARATOR: &str = "\n";
/// 预览默认字符上限
pub const DEFAULT_MAX_LEN: usize = 500;
/// 截断后缀
pub const DEFAULT_SUFFIX: &str = " [...]";
/// 引用块分隔符（正文预览用）
pub const QUOTE_SEPARATOR: &str = "\n> ";
/// 提交消息续行分隔符
pub const COMMIT_SEPARATOR: &str = "\n  ";

/// 短 hash 长度
pub const SHORT_HASH_LEN: usize = 7;

/// `[label](url)`，不做任何转义
pub fn build_link(label: &str, url: &str) -> String {
    format!("[{}]({})", label, url)
}

/// 取前 7 个字符，不校验是否为合法 hash
pub fn short_hash(id: &str) -> String {
    id.chars().take(SHORT_HASH_LEN).collect()
}

/// 预览参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preview<'a> {
    pub separator: &'a str,
    pub max_len: usize,
    pub suffix: &'a str,
}

impl Default for Preview<'_> {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            max_len: DEFAULT_MAX_LEN,
            suffix: DEFAULT_SUFFIX,
        }
    }
}

impl<'a> Preview<'a> {
    /// 默认上限和后缀，指定分隔符
    pub fn with_separator(separator: &'a str) -> Self {
        Self {
            separator,
            ..Self::default()
        }
    }

    /// 截断多行正文
    ///
    /// 单行正文原样返回（无论多长）。多行时逐行累加长度（每行计入分隔符），
    /// 第一条放不下的行被截断并加后缀，其后所有行丢弃。
    /// 长度按字符计。
    pub fn apply(&self, text: &str) -> String {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() <= 1 {
            return text.to_string();
        }

        let max_len = self.max_len as isize;
        let sep_len = self.separator.chars().count() as isize;
        let suffix_len = self.suffix.chars().count() as isize;

        let mut text_len: isize = 0;
        let mut result: Vec<String> = Vec::with_capacity(lines.len());
        for line in lines {
            let line_len = line.chars().count() as isize;
            if text_len + line_len < max_len - suffix_len {
                result.push(line.to_string());
                text_len += line_len + sep_len;
            } else {
                let keep = max_len - text_len - suffix_len;
                if keep <= 0 {
                    // 累计长度已含尾随分隔符，多字符分隔符可能越界
                    let overflow = text_len + suffix_len - max_len;
                    trim_tail(&mut result, overflow.max(0) as usize);
                    result.push(self.suffix.to_string());
                } else {
                    let head: String = line.chars().take(keep as usize).collect();
                    result.push(head + self.suffix);
                }
                break;
            }
        }

        result.join(self.separator)
    }
}

/// 从已保留行的末尾去掉 `count` 个字符
fn trim_tail(lines: &mut [String], mut count: usize) {
    for line in lines.iter_mut().rev() {
        if count == 0 {
            break;
        }
        let len = line.chars().count();
        let keep = len.saturating_sub(count);
        count -= len - keep;
        *line = line.chars().take(keep).collect();
    }
}

/// 可缺省正文的预览：缺省原样传出
pub fn preview(text: Option<&str>, options: Preview<'_>) -> Option<String> {
    match text {
        None => None,
        Some("") => Some(String::new()),
        Some(body) => Some(options.apply(body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(max_len: usize) -> Preview<'static> {
        Preview {
            separator: "\n> ",
            max_len,
            suffix: "…",
        }
    }

    #[test]
    fn test_build_link() {
        assert_eq!(build_link("org/repo", "https://x/org/repo"), "[org/repo](https://x/org/repo)");
        // 不转义
        assert_eq!(build_link("a]b", "u)v"), "[a]b](u)v)");
    }

    #[test]
    fn test_short_hash() {
        assert_eq!(short_hash("0123456789abcdef"), "0123456");
        assert_eq!(short_hash("abc"), "abc");
    }

    #[test]
    fn test_single_line_is_never_truncated() {
        let long = "x".repeat(2000);
        assert_eq!(opts(10).apply(&long), long);
        assert_eq!(preview(Some(&long), opts(10)).unwrap(), long);
    }

    #[test]
    fn test_absent_and_empty_propagate() {
        assert_eq!(preview(None, opts(10)), None);
        assert_eq!(preview(Some(""), opts(10)), Some(String::new()));
    }

    #[test]
    fn test_short_multiline_joins_with_separator() {
        assert_eq!(
            Preview::with_separator("\n> ").apply("line1\nline2"),
            "line1\n> line2"
        );
    }

    #[test]
    fn test_truncates_overflowing_line_and_drops_rest() {
        let options = Preview {
            separator: "\n",
            max_len: 20,
            suffix: " [...]",
        };
        // "abcdef" 占 6+1，第二行只剩 20 - 7 - 6 = 7 个字符
        let result = options.apply("abcdef\n0123456789abcdef\nshort");
        assert_eq!(result, "abcdef\n0123456 [...]");
        assert!(result.chars().count() <= 20);
        assert!(!result.contains("short"));
    }

    #[test]
    fn test_suffix_alone_when_no_room_left() {
        let options = Preview {
            separator: "\n",
            max_len: 12,
            suffix: " [...]",
        };
        // 第一行占满 5+1，剩余 12 - 6 - 6 = 0
        assert_eq!(options.apply("abcde\nfghij\nk"), "abcde\n [...]");
    }

    #[test]
    fn test_multiline_result_is_bounded_and_ends_with_suffix() {
        let body = (0..50)
            .map(|i| format!("line number {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        for max_len in [10, 37, 100, 499] {
            let result = opts(max_len).apply(&body);
            assert!(result.chars().count() <= max_len, "max_len {}", max_len);
            assert!(result.ends_with('…'));
        }
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let options = Preview {
            separator: "\n",
            max_len: 8,
            suffix: "~",
        };
        assert_eq!(options.apply("日本\n語のテキスト"), "日本\n語のテキ~");
    }

    #[test]
    fn test_multichar_separator_does_not_overshoot() {
        // 第一行 17 字符后累计 20，已无空间，只追加后缀
        let result = opts(20).apply("aaaaaaaaaaaaaaaaa\nbbbb");
        assert_eq!(result, "aaaaaaaaaaaaaaaa\n> …");
        assert_eq!(result.chars().count(), 20);
    }

    #[test]
    fn test_idempotent_when_not_truncated() {
        let plain = Preview::default();
        let body = "first\nsecond\nthird";
        let once = plain.apply(body);
        assert_eq!(once, body);
        assert_eq!(plain.apply(&once), once);
    }
}
