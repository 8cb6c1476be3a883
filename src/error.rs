//! 统一错误处理模块
//!
//! 提供词典加载、模板编译、剪贴板访问等环节的统一错误类型定义。
//! 注意：翻译未命中不是错误，引擎直接原样返回输入文本。

// 标准库导入
use std::fmt;

// 第三方crate导入
use anyhow::Error as AnyhowError;

/// 统一错误类型
#[derive(Debug)]
pub enum TranslationError {
    /// 词典数据加载失败（文件缺失、JSON格式错误等）
    DictionaryLoad {
        /// 数据文件路径
        path: String,
        /// 底层错误信息
        source: String,
    },

    /// 模板语法错误
    TemplateSyntax {
        /// 出错的模板原文
        template: String,
        /// 错误原因
        reason: String,
    },

    /// 剪贴板读写错误
    Clipboard {
        /// 操作类型（读取、写入、初始化）
        operation: String,
        /// 错误详情
        details: String,
    },

    /// 配置相关错误
    Configuration {
        /// 配置项名称
        field: String,
        /// 错误原因
        reason: String,
    },

    /// 内部处理错误（包装anyhow::Error）
    Internal {
        /// 包装的错误
        source: AnyhowError,
    },
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationError::DictionaryLoad { path, source } => {
                write!(f, "词典加载失败 [{}]: {}", path, source)
            }
            TranslationError::TemplateSyntax { template, reason } => {
                write!(f, "模板语法错误 [{}]: {}", template, reason)
            }
            TranslationError::Clipboard { operation, details } => {
                write!(f, "剪贴板{}失败: {}", operation, details)
            }
            TranslationError::Configuration { field, reason } => {
                write!(f, "配置错误 [{}]: {}", field, reason)
            }
            TranslationError::Internal { source } => {
                write!(f, "内部处理错误: {}", source)
            }
        }
    }
}

impl std::error::Error for TranslationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TranslationError::Internal { source } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, TranslationError>;

/// 便捷的错误创建宏
#[macro_export]
macro_rules! translation_error {
    (dictionary, $path:expr, $source:expr) => {
        $crate::error::TranslationError::DictionaryLoad {
            path: $path.to_string(),
            source: $source.to_string(),
        }
    };
    (template, $template:expr, $reason:expr) => {
        $crate::error::TranslationError::TemplateSyntax {
            template: $template.to_string(),
            reason: $reason.to_string(),
        }
    };
    (clipboard, $op:expr, $details:expr) => {
        $crate::error::TranslationError::Clipboard {
            operation: $op.to_string(),
            details: $details.to_string(),
        }
    };
    (config, $field:expr, $reason:expr) => {
        $crate::error::TranslationError::Configuration {
            field: $field.to_string(),
            reason: $reason.to_string(),
        }
    };
}

/// 从anyhow::Error转换为TranslationError
impl From<AnyhowError> for TranslationError {
    fn from(error: AnyhowError) -> Self {
        TranslationError::Internal { source: error }
    }
}
