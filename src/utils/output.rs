//! # 美化输出工具
//!
//! 提供统一的终端输出样式：[OK] / [ERR] / [WARN] / [*] 前缀。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块使用
//! - 使用 `colored` crate

use colored::Colorize;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

const RULE_WIDTH: usize = 60;

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(RULE_WIDTH);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(RULE_WIDTH).dimmed());
}

/// 打印模型参数，每行若干个 `name = value`
pub fn print_parameters<'a, I>(parameters: I)
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let items: Vec<String> = parameters
        .into_iter()
        .map(|(name, value)| format!("{} = {}", name.cyan(), value))
        .collect();
    for chunk in items.chunks(4) {
        println!("    {}", chunk.join(", "));
    }
}
