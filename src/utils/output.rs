//! # 美化输出工具
//!
//! 提供统一的终端输出样式。库层只返回警告，打印统一在这里完成。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块使用
//! - 使用 `colored` crate

use crate::models::Warning;

use colored::Colorize;

/// 同类警告最多逐条打印的数量
const MAX_WARNINGS_SHOWN: usize = 10;

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

/// 打印完成消息
pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印警告列表，超出部分折叠为一行
pub fn print_warnings(warnings: &[Warning]) {
    for w in warnings.iter().take(MAX_WARNINGS_SHOWN) {
        print_warning(&w.to_string());
    }
    if warnings.len() > MAX_WARNINGS_SHOWN {
        print_warning(&format!(
            "... and {} more warning(s)",
            warnings.len() - MAX_WARNINGS_SHOWN
        ));
    }
}

/// 打印转换成功消息
pub fn print_conversion(from: &str, to: &str) {
    println!(
        "{} {} {} {}",
        "[OK]".green().bold(),
        from.dimmed(),
        "->".cyan(),
        to
    );
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}
