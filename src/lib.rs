//! SevaSetu - 政务服务问答助手（多语言语音输出）
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Conversation Context: 会话上下文（语言、问题、答案、引用、音频、历史）
//!
//! 应用层 (application/):
//! - Ports: 端口定义（KnowledgeBase, SpeechSynthesizer, SessionManager）
//! - Commands: CQRS 命令处理器（开启会话、提问、切换语言、清空历史、关闭会话）
//! - Queries: CQRS 查询处理器（历史记录、轮次音频、语言列表）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: SessionManager 内存实现
//! - Adapters: Knowledge Base Client, Speech Client
//!
//! 检索、排序、生成、语音合成全部委托给外部托管服务，
//! 本系统只包含配置加载、请求/响应映射和展示层。

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
