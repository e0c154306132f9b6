// 子进程环境变量构造
//
// 只生成新的变量列表交给子进程，不修改当前进程环境。

use std::ffi::{OsStr, OsString};
use std::path::Path;

/// 将目录加到 PATH 最前面
///
/// - 变量名不区分大小写匹配（Windows 上常见为 `Path`），保留原有写法
/// - 只修改第一个匹配项，结果中不会出现重复的 PATH
/// - 没有 PATH 时追加 `PATH=<dir>`
pub fn prepend_to_search_path(
    mut env: Vec<(OsString, OsString)>,
    dir: &Path,
    separator: char,
) -> Vec<(OsString, OsString)> {
    match env.iter_mut().find(|(key, _)| is_path_key(key)) {
        Some((_, value)) => {
            let mut joined = OsString::from(dir.as_os_str());
            joined.push(separator.to_string());
            joined.push(value.as_os_str());
            *value = joined;
        }
        None => env.push((OsString::from("PATH"), OsString::from(dir.as_os_str()))),
    }
    env
}

fn is_path_key(key: &OsStr) -> bool {
    key.to_str()
        .map(|k| k.eq_ignore_ascii_case("PATH"))
        .unwrap_or(false)
}
