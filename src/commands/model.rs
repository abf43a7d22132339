//! # list / info 命令实现
//!
//! ## 依赖关系
//! - 使用 `cli/model.rs` 定义的参数
//! - 使用 `shapes/` 注册表
//! - 使用 `tabled` 打印表格

use crate::cli::model::{InfoArgs, ListArgs};
use crate::error::Result;
use crate::shapes::{self, all_models};
use crate::utils::output;

use tabled::{settings::Style, Table, Tabled};

/// 执行 list 命令
pub fn execute_list(args: ListArgs) -> Result<()> {
    output::print_header("Available models");

    #[derive(Tabled)]
    struct ModelRow {
        #[tabled(rename = "Name")]
        name: &'static str,
        #[tabled(rename = "Category")]
        category: &'static str,
        #[tabled(rename = "Parameters")]
        parameters: usize,
        #[tabled(rename = "Tests")]
        tests: usize,
        #[tabled(rename = "Title")]
        title: &'static str,
    }

    let rows: Vec<ModelRow> = all_models()
        .map(|m| m.descriptor())
        .filter(|d| match &args.category {
            Some(prefix) => d.category.starts_with(prefix.as_str()),
            None => true,
        })
        .map(|d| ModelRow {
            name: d.name,
            category: d.category,
            parameters: d.model_parameters().len(),
            tests: d.tests.len(),
            title: d.title,
        })
        .collect();

    if rows.is_empty() {
        output::print_warning("No models match the requested category");
        return Ok(());
    }

    let count = rows.len();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
    output::print_info(&format!("{} models", count));

    Ok(())
}

/// 执行 info 命令
pub fn execute_info(args: InfoArgs) -> Result<()> {
    let model = shapes::load_model(&args.model)?;
    let d = model.descriptor();

    output::print_header(&format!("{}: {}", d.name, d.title));
    output::print_info(&format!("Category: {}", d.category));
    if !d.description.is_empty() {
        println!();
        for line in d.description.lines() {
            println!("    {}", line.trim());
        }
        println!();
    }

    #[derive(Tabled)]
    struct ParameterRow {
        #[tabled(rename = "Name")]
        name: &'static str,
        #[tabled(rename = "Units")]
        units: &'static str,
        #[tabled(rename = "Default")]
        default: f64,
        #[tabled(rename = "Lower")]
        lower: f64,
        #[tabled(rename = "Upper")]
        upper: f64,
        #[tabled(rename = "Type")]
        role: String,
        #[tabled(rename = "Description")]
        description: &'static str,
    }

    let rows: Vec<ParameterRow> = d
        .parameters
        .iter()
        .map(|p| ParameterRow {
            name: p.name,
            units: p.units,
            default: p.default,
            lower: p.limits.0,
            upper: p.limits.1,
            role: p.role.to_string(),
            description: p.description,
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    if !d.demo.is_empty() {
        let demo: Vec<String> = d.demo.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        output::print_info(&format!("Demo: {}", demo.join(", ")));
    }

    let modes = model.effective_radius_modes();
    if modes.is_empty() {
        output::print_info("Effective radius: not defined");
    } else {
        let listed: Vec<String> = modes
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{}={}", i + 1, name))
            .collect();
        output::print_info(&format!("Effective radius modes: {}", listed.join(", ")));
    }

    output::print_info(&format!("Sources: {}", d.source.join(", ")));
    output::print_info(&format!("Reference test cases: {}", d.tests.len()));

    Ok(())
}
