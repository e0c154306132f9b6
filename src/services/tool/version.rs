// 版本号解析
//
// 各工具 `--version` 的输出格式不同，解析规则集中在纯函数里，
// 不依赖进程即可测试。

use crate::models::ToolKind;

/// 从 `--version` 输出中提取版本号
///
/// - claude: 输出形如 `claude-code/0.2.29 darwin-arm64 node-v22.12.0`，
///   取第一段 `/` 之后的部分；格式不符时退回原始输出
/// - 其他工具: 原样返回去除首尾空白后的输出
///
/// 按工具标识精确匹配，`claude-nightly`、`claude-code` 等其他名称不走 claude 规则。
pub fn parse_version(tool_name: &str, raw_output: &str) -> String {
    let output = raw_output.trim();

    if ToolKind::by_id(tool_name) == Some(ToolKind::Claude) {
        if let Some(version) = parse_product_slash_version(output) {
            return version.to_string();
        }
    }

    output.to_string()
}

/// `<product>/<version> ...` -> `<version>`
fn parse_product_slash_version(output: &str) -> Option<&str> {
    let first = output.split(' ').next()?;
    let mut parts = first.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(version), None) => Some(version),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claude_product_version_is_extracted() {
        assert_eq!(
            parse_version("claude", "claude-code/0.2.29 darwin-arm64 node-v22.12.0"),
            "0.2.29"
        );
    }

    #[test]
    fn claude_output_is_trimmed_before_parsing() {
        assert_eq!(
            parse_version("claude", "\n  claude-code/1.0.3 linux-x64 node-v20.11.1\n"),
            "1.0.3"
        );
    }

    #[test]
    fn claude_unexpected_format_falls_back_to_raw() {
        // 新版 claude 输出为 "2.0.37 (Claude Code)"
        assert_eq!(parse_version("claude", "2.0.37 (Claude Code)"), "2.0.37 (Claude Code)");
        assert_eq!(parse_version("claude", "a/b/c extra"), "a/b/c extra");
    }

    #[test]
    fn other_tools_use_raw_output() {
        assert_eq!(parse_version("gemini", "1.0.0"), "1.0.0");
        assert_eq!(parse_version("gemini", " 1.0.0\n"), "1.0.0");
        assert_eq!(parse_version("codex", "codex-cli/0.46.0"), "codex-cli/0.46.0");
    }

    #[test]
    fn claude_like_names_are_not_parsed() {
        let raw = "claude-code/0.2.29 darwin-arm64 node-v22.12.0";
        assert_eq!(parse_version("claude-code", raw), raw);
        assert_eq!(parse_version("claude-nightly", raw), raw);
    }

    #[test]
    fn empty_output_yields_empty_version() {
        assert_eq!(parse_version("claude", "   "), "");
        assert_eq!(parse_version("codex", ""), "");
    }
}
