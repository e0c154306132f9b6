// 测试用的内存文件系统、脚本化进程执行器和日志记录器

use super::context::{InstallLayout, ToolContext};
use crate::core::logger::LogSink;
use crate::utils::{
    CombinedOutput, CommandResult, CommandSpec, FileSystem, PlatformPaths, ProcessRunner,
};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsCall {
    IsFile(PathBuf),
    CreateDirAll(PathBuf),
    FindInSearchPath(String),
}

/// 内存文件系统，记录每一次访问
#[derive(Default)]
pub struct FakeFileSystem {
    files: Mutex<HashSet<PathBuf>>,
    dirs: Mutex<HashSet<PathBuf>>,
    search_path: Mutex<HashMap<String, PathBuf>>,
    fail_create: Mutex<bool>,
    calls: Mutex<Vec<FsCall>>,
}

impl FakeFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl Into<PathBuf>) {
        self.files.lock().unwrap().insert(path.into());
    }

    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        self.dirs.lock().unwrap().insert(path.into());
    }

    pub fn add_to_search_path(&self, name: &str, path: impl Into<PathBuf>) {
        self.search_path
            .lock()
            .unwrap()
            .insert(name.to_string(), path.into());
    }

    pub fn fail_create_dir(&self) {
        *self.fail_create.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<FsCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created_dirs(&self) -> Vec<PathBuf> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                FsCall::CreateDirAll(p) => Some(p),
                _ => None,
            })
            .collect()
    }
}

impl FileSystem for FakeFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        self.calls
            .lock()
            .unwrap()
            .push(FsCall::IsFile(path.to_path_buf()));
        self.files.lock().unwrap().contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(FsCall::CreateDirAll(path.to_path_buf()));
        if *self.fail_create.lock().unwrap() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        self.dirs.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    fn find_in_search_path(&self, name: &str) -> Option<PathBuf> {
        self.calls
            .lock()
            .unwrap()
            .push(FsCall::FindInSearchPath(name.to_string()));
        self.search_path.lock().unwrap().get(name).cloned()
    }
}

/// 预设的进程结果
#[derive(Debug, Clone)]
pub enum Scripted {
    /// 进程正常运行，给定退出码与输出
    Exit { code: i32, stdout: String, stderr: String },
    /// 进程无法启动
    SpawnError,
}

impl Scripted {
    pub fn ok(stdout: &str) -> Self {
        Scripted::Exit {
            code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn fail(code: i32, stderr: &str) -> Self {
        Scripted::Exit {
            code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

/// 按程序路径返回预设结果的执行器，未预设的程序视为无法启动
#[derive(Default)]
pub struct FakeProcessRunner {
    scripts: Mutex<HashMap<PathBuf, Scripted>>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl FakeProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, program: impl Into<PathBuf>, result: Scripted) {
        self.scripts.lock().unwrap().insert(program.into(), result);
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    fn lookup(&self, spec: &CommandSpec) -> io::Result<(i32, String, String)> {
        self.calls.lock().unwrap().push(spec.clone());
        match self.scripts.lock().unwrap().get(&spec.program) {
            Some(Scripted::Exit {
                code,
                stdout,
                stderr,
            }) => Ok((*code, stdout.clone(), stderr.clone())),
            Some(Scripted::SpawnError) | None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("program not found: {}", spec.program.display()),
            )),
        }
    }
}

impl ProcessRunner for FakeProcessRunner {
    fn output(&self, spec: &CommandSpec) -> io::Result<CommandResult> {
        let (code, stdout, stderr) = self.lookup(spec)?;
        Ok(CommandResult {
            success: code == 0,
            stdout: stdout.trim().to_string(),
            stderr: stderr.trim().to_string(),
            exit_code: Some(code),
        })
    }

    fn combined_output(&self, spec: &CommandSpec) -> io::Result<CombinedOutput> {
        let (code, stdout, stderr) = self.lookup(spec)?;
        Ok(CombinedOutput {
            success: code == 0,
            exit_code: Some(code),
            output: format!("{stdout}{stderr}"),
        })
    }
}

/// 记录所有日志消息
#[derive(Default)]
pub struct RecordingLogSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingLogSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl LogSink for RecordingLogSink {
    fn log(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// 组装好的测试环境
pub struct Harness {
    pub fs: Arc<FakeFileSystem>,
    pub runner: Arc<FakeProcessRunner>,
    pub log: Arc<RecordingLogSink>,
    pub ctx: ToolContext,
}

impl Harness {
    pub const ROOT: &'static str = "/home/dev/.cceasy/node";

    pub fn new(platform: Arc<dyn PlatformPaths>) -> Self {
        let fs = Arc::new(FakeFileSystem::new());
        let runner = Arc::new(FakeProcessRunner::new());
        let ctx = ToolContext::new(
            fs.clone(),
            runner.clone(),
            platform,
            InstallLayout::new(Self::ROOT),
        );
        Harness {
            fs,
            runner,
            log: Arc::new(RecordingLogSink::default()),
            ctx,
        }
    }

    pub fn root(&self) -> PathBuf {
        PathBuf::from(Self::ROOT)
    }
}
