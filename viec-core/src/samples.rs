//! Demonstration todos seeded on first run

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{Priority, Todo, TodoDraft};

/// Three sample todos: one due `today`, one undated, one already completed
pub fn sample_todos(today: NaiveDate, now: DateTime<Utc>) -> Vec<Todo> {
    let report = TodoDraft::new("Hoàn thành báo cáo tháng")
        .description("Viết báo cáo tổng kết công việc tháng này")
        .due(today)
        .priority(Priority::High)
        .project("work")
        .tags(["báo cáo", "tháng"]);

    let shopping = TodoDraft::new("Mua sắm cuối tuần")
        .description("Mua thực phẩm và đồ gia dụng")
        .priority(Priority::Medium)
        .project("shopping")
        .tags(["thực phẩm", "gia dụng"]);

    let exercise = TodoDraft::new("Tập thể dục")
        .description("Chạy bộ 30 phút trong công viên")
        .priority(Priority::Low)
        .project("personal")
        .tags(["sức khỏe", "thể dục"]);

    let mut done = Todo::from_draft(exercise, now);
    done.completed = true;
    done.completed_at = Some(now);

    vec![
        Todo::from_draft(report, now),
        Todo::from_draft(shopping, now),
        done,
    ]
}
