use std::ffi::OsString;
use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

#[cfg(target_os = "windows")]
use std::os::windows::process::CommandExt;

/// 待执行的外部命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// 子进程完整环境；为 None 时继承当前进程环境
    pub env: Option<Vec<(OsString, OsString)>>,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
            env: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, env: Vec<(OsString, OsString)>) -> Self {
        self.env = Some(env);
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// 命令执行结果（stdout / stderr 分开捕获）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

impl CommandResult {
    pub fn from_output(output: Output) -> Self {
        CommandResult {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            exit_code: output.status.code(),
        }
    }
}

/// 命令执行结果（stdout 与 stderr 按输出顺序合并）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub output: String,
}

/// 外部进程执行接口
pub trait ProcessRunner: Send + Sync {
    /// 执行命令，分别捕获 stdout 与 stderr
    fn output(&self, spec: &CommandSpec) -> io::Result<CommandResult>;

    /// 执行命令，stdout 与 stderr 写入同一管道
    fn combined_output(&self, spec: &CommandSpec) -> io::Result<CombinedOutput>;
}

/// 基于 std::process 的命令执行器
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        SystemProcessRunner
    }

    fn build(&self, spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args).stdin(Stdio::null());

        if let Some(env) = &spec.env {
            cmd.env_clear();
            cmd.envs(env.iter().map(|(k, v)| (k, v)));
        }

        #[cfg(target_os = "windows")]
        cmd.creation_flags(0x08000000); // CREATE_NO_WINDOW

        cmd
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn output(&self, spec: &CommandSpec) -> io::Result<CommandResult> {
        let output = self.build(spec).output()?;
        Ok(CommandResult::from_output(output))
    }

    fn combined_output(&self, spec: &CommandSpec) -> io::Result<CombinedOutput> {
        let (mut reader, writer) = io::pipe()?;

        let mut cmd = self.build(spec);
        cmd.stdout(writer.try_clone()?).stderr(writer);
        let mut child = cmd.spawn()?;
        // Command 仍持有写端，不释放则读端永远等不到 EOF
        drop(cmd);

        let mut buf = Vec::new();
        let read_result = reader.read_to_end(&mut buf);
        let status = child.wait()?;
        read_result?;

        Ok(CombinedOutput {
            success: status.success(),
            exit_code: status.code(),
            output: String::from_utf8_lossy(&buf).into_owned(),
        })
    }
}
