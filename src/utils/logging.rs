//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use tracing::info;

use crate::workflow::AnswerStats;

/// 记录会话启动信息
///
/// # 参数
/// - `source`: 学习集来源描述
/// - `set_count`: 可用题集数量
pub fn log_session_start(source: &str, set_count: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 测验会话启动");
    info!("📁 学习集来源: {}", source);
    info!("📊 可用题集: {}", set_count);
    info!("{}", "=".repeat(60));
}

/// 记录题集加载信息
pub fn log_set_loaded(set_id: &str, name: &str, question_count: usize, term_count: usize) {
    info!(
        "✓ 已载入题集 {} ({}): {} 道题目, {} 个词条",
        set_id, name, question_count, term_count
    );
}

/// 打印最终统计信息
///
/// # 参数
/// - `stats`: 作答统计
/// - `answered`: 已记录答案的题目数
/// - `total`: 题目总数
/// - `span`: 第一次到最后一次作答的用时
pub fn print_final_stats(
    stats: &AnswerStats,
    answered: usize,
    total: usize,
    span: Option<chrono::Duration>,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 测验结束统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已作答: {}/{}", answered, total);
    info!("📝 提交次数: {}", stats.submitted);
    info!("❌ 被拒绝: {}", stats.rejected);
    if let Some(span) = span {
        info!("⏱️ 作答用时: {} 秒", span.num_seconds());
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
