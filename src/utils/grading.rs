//! 成绩计算
//!
//! 平均分只统计每个任务最新一次提交的成绩，使用十进制运算避免浮点误差。

use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::submissions::entities::Submission;
use crate::models::submissions::responses::TaskGradeItem;
use crate::models::tasks::entities::Task;

pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 20.0;

/// 校验成绩：必须存在、有限且在 [0, 20] 内
pub fn validate_grade(grade: Option<f64>) -> Result<f64, &'static str> {
    match grade {
        None => Err("Grade is required"),
        Some(g) if !g.is_finite() => Err("Grade must be a finite number"),
        Some(g) if !(MIN_GRADE..=MAX_GRADE).contains(&g) => {
            Err("Grade must be between 0 and 20")
        }
        Some(g) => Ok(g),
    }
}

/// 最新提交：submitted_at 最大，相同时取 id 最大
pub fn latest_submission(submissions: &[Submission]) -> Option<&Submission> {
    submissions
        .iter()
        .max_by_key(|s| (s.submitted_at, s.id))
}

fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(value))
}

/// 求平均并四舍五入（远离零）到两位小数；没有成绩时返回 None
pub fn compute_average<I>(grades: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = Decimal::ZERO;
    let mut count: u32 = 0;
    for grade in grades {
        if let Some(d) = to_decimal(grade) {
            sum += d;
            count += 1;
        }
    }
    if count == 0 {
        return None;
    }

    (sum / Decimal::from(count))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
}

/// 按任务汇总某学生的最新成绩，并计算平均分
///
/// `submissions` 只应包含该学生的提交。
pub fn summarize_student_grades(
    tasks: &[Task],
    submissions: &[Submission],
) -> (Vec<TaskGradeItem>, Option<f64>) {
    let items: Vec<TaskGradeItem> = tasks
        .iter()
        .map(|task| {
            let for_task: Vec<Submission> = submissions
                .iter()
                .filter(|s| s.task_id == task.id)
                .cloned()
                .collect();
            let latest = latest_submission(&for_task);
            TaskGradeItem {
                task_id: task.id,
                task_name: task.name.clone(),
                submission_id: latest.map(|s| s.id),
                grade: latest.and_then(|s| s.grade),
            }
        })
        .collect();

    let average = compute_average(items.iter().filter_map(|item| item.grade));
    (items, average)
}

/// 只需要平均分时使用
pub fn student_average(tasks: &[Task], submissions: &[Submission]) -> Option<f64> {
    summarize_student_grades(tasks, submissions).1
}
