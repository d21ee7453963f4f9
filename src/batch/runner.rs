//! # 批量执行器
//!
//! 并行执行批量任务（目前用于逐帧渲染图片）。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/view.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{Result, XyzError};
use crate::utils::progress;

use rayon::prelude::*;

/// 单项处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    /// 处理成功，携带产物名
    Success(String),
    /// 跳过（如空帧）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (条目, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功条目的产物名
    pub outputs: Vec<String>,
    pub skipped: Vec<String>,
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(item) => self.outputs.push(item),
            ProcessResult::Skipped(item) => self.skipped.push(item),
            ProcessResult::Failed(item, err) => self.failures.push((item, err)),
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.outputs.len() + self.skipped.len() + self.failures.len()
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器，`jobs == 0` 时使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理条目列表
    pub fn run<T, F>(&self, items: &[T], message: &str, processor: F) -> Result<BatchResult>
    where
        T: Sync,
        F: Fn(&T) -> ProcessResult + Sync + Send,
    {
        let pb = progress::create_progress_bar(items.len() as u64, message);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| XyzError::InvalidArgument(format!("cannot start thread pool: {}", e)))?;

        let results: Vec<ProcessResult> = pool.install(|| {
            items
                .par_iter()
                .map(|item| {
                    let result = processor(item);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_collects_every_outcome() {
        let runner = BatchRunner::new(2);
        let items: Vec<usize> = (0..6).collect();
        let result = runner
            .run(&items, "Testing", |&i| match i % 3 {
                0 => ProcessResult::Success(i.to_string()),
                1 => ProcessResult::Skipped(i.to_string()),
                _ => ProcessResult::Failed(i.to_string(), "boom".to_string()),
            })
            .unwrap();

        assert_eq!(result.total(), 6);
        let mut outputs = result.outputs.clone();
        outputs.sort();
        assert_eq!(outputs, vec!["0", "3"]);
        assert_eq!(result.skipped.len(), 2);
        assert_eq!(result.failures.len(), 2);
        assert!(result.failures.iter().all(|(_, e)| e == "boom"));
    }

    #[test]
    fn test_zero_jobs_uses_all_cpus() {
        assert_eq!(BatchRunner::new(0).jobs(), num_cpus::get());
    }
}
