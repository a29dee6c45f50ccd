//! 环境变量 key 常量与别名定义
//!
//! 主变量统一使用 `PYTHENV_*` 前缀。

/// 隔离环境与其中的可执行文件
pub mod runner {
    /// Environment tool command line, e.g. `virtualenv` or `python3 -m venv`
    pub const PYTHENV_VENV_TOOL: &str = "PYTHENV_VENV_TOOL";
    pub const VENV_TOOL_ALIASES: &[&str] = &["VIRTUALENV"];

    /// Installer executable name inside the environment's bin directory
    pub const PYTHENV_INSTALLER: &str = "PYTHENV_INSTALLER";

    /// Interpreter executable name inside the environment's bin directory
    pub const PYTHENV_INTERPRETER: &str = "PYTHENV_INTERPRETER";

    /// Parent directory for environments and generated requirements files
    pub const PYTHENV_TMP_DIR: &str = "PYTHENV_TMP_DIR";
}

/// 可观测性与日志
pub mod observability {
    pub const PYTHENV_QUIET: &str = "PYTHENV_QUIET";
    pub const PYTHENV_LOG_LEVEL: &str = "PYTHENV_LOG_LEVEL";
    pub const PYTHENV_LOG_JSON: &str = "PYTHENV_LOG_JSON";
    pub const PYTHENV_AUDIT_LOG: &str = "PYTHENV_AUDIT_LOG";
}
