use std::fmt;

#[derive(Debug, Clone)]
pub enum WebError {
    Config(String),
    Validation(String),
    FileOperation(String),
    Logging(String),
}

impl WebError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            WebError::Config(_) => "E001",
            WebError::Validation(_) => "E002",
            WebError::FileOperation(_) => "E003",
            WebError::Logging(_) => "E004",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            WebError::Config(_) => "Configuration Error",
            WebError::Validation(_) => "Validation Error",
            WebError::FileOperation(_) => "File Operation Error",
            WebError::Logging(_) => "Logging Setup Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            WebError::Config(msg)
            | WebError::Validation(msg)
            | WebError::FileOperation(msg)
            | WebError::Logging(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于启动失败时打印到终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for WebError {}

// 便捷的构造函数
impl WebError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        WebError::Config(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        WebError::Validation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        WebError::FileOperation(msg.into())
    }

    pub fn logging<T: Into<String>>(msg: T) -> Self {
        WebError::Logging(msg.into())
    }
}

impl From<config::ConfigError> for WebError {
    fn from(err: config::ConfigError) -> Self {
        WebError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WebError>;
