/// 编辑引擎模块
///
/// 该模块实现跨文件的五个编辑操作（move/copy/delete/add/outdated）。
/// 引擎只做决策和树变更并返回结构化结果，进度渲染由调用方
/// （命令行层）负责，核心逻辑无需捕获控制台输出即可测试。
///
/// # 架构设计
///
/// - **engine**: 编辑引擎，每个操作对文件集合做一趟遍历
/// - **outcome**: 变更记录系统，逐文件记录触及与动作
pub mod engine;
pub mod outcome;

// === 导出公共接口 ===
pub use engine::{EditEngine, OUTDATED_MODIFIER};
pub use outcome::{ChangeAction, EditOutcome, FileChange};
