use crate::models::{AttendanceStatus, DayView, SlotStatus, StatsResponse, SubjectSlot, SubjectStats};
use crate::stats::SAFE_THRESHOLD;
use std::fmt::Write;

pub fn render_index(view: &DayView) -> String {
    let heading = if view.is_today {
        "Today's Classes".to_string()
    } else {
        format!("Classes for {}", view.weekday)
    };
    let body = if view.is_weekend {
        format!(
            r#"<section class="holiday"><h2>Holiday</h2><p>No classes scheduled for {}</p></section>"#,
            view.weekday
        )
    } else {
        let cards: String = view
            .subjects
            .iter()
            .map(|slot| render_slot(view, slot))
            .collect();
        format!(r#"<h2>{heading}</h2><section class="cards">{cards}</section>"#)
    };

    PAGE_HTML
        .replace("{{TITLE}}", "Attendance Tracker")
        .replace("{{NAV}}", &render_day_nav(view))
        .replace("{{BODY}}", &body)
}

pub fn render_stats(stats: &StatsResponse) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        r#"<section class="panel">
  <div class="stat"><span class="label">Overall Attendance</span><span class="value {class}">{overall:.1}%</span></div>
  <div class="stat"><span class="label">Total Subjects</span><span class="value">{subjects}</span></div>
  <div class="stat"><span class="label">Total Classes</span><span class="value">{classes}</span></div>
  <div class="stat"><span class="label">Semester</span><span class="value small">{start} to {end}</span><span class="muted">{weeks} weeks left, {elapsed:.0}% elapsed</span></div>
</section>"#,
        class = status_class(stats.overall_status),
        overall = stats.overall_attendance,
        subjects = stats.total_subjects,
        classes = stats.total_classes,
        start = stats.semester.start,
        end = stats.semester.end,
        weeks = stats.semester.weeks_remaining,
        elapsed = stats.semester.elapsed_percent,
    );

    if stats.subjects.is_empty() {
        body.push_str(
            r#"<section class="holiday"><h2>No Data Yet</h2><p>Start marking your attendance to see statistics here.</p><a class="btn" href="/">Mark Today's Attendance</a></section>"#,
        );
    } else {
        body.push_str("<h2>Subject-wise Breakdown</h2><section class=\"cards\">");
        for subject in &stats.subjects {
            body.push_str(&render_subject_stats(subject));
        }
        body.push_str("</section>");
    }

    PAGE_HTML
        .replace("{{TITLE}}", "Attendance Statistics")
        .replace("{{NAV}}", r#"<nav><a class="btn" href="/">Back</a></nav>"#)
        .replace("{{BODY}}", &body)
}

fn render_day_nav(view: &DayView) -> String {
    let badge = if view.is_today { "" } else { r#" <span class="badge">Past Date</span>"# };
    let step = |target: Option<chrono::NaiveDate>, arrow: &str| match target {
        Some(day) => format!(r#"<a class="btn" href="/?date={day}">{arrow}</a>"#),
        None => String::new(),
    };
    format!(
        r#"<nav>
  <span class="date">{weekday}, {date}{badge}</span>
  {previous}
  <form method="get" action="/"><input type="date" name="date" value="{date}" /><button class="btn" type="submit">Go</button></form>
  {next}
  <a class="btn" href="/">Today</a>
  <a class="btn" href="/stats">View Stats</a>
</nav>"#,
        weekday = view.weekday,
        date = view.date,
        previous = step(view.previous, "&larr;"),
        next = step(view.next, "&rarr;"),
    )
}

fn render_slot(view: &DayView, slot: &SubjectSlot) -> String {
    let subject = escape(&slot.subject);
    let periods = if slot.periods > 1 {
        format!(r#"<span class="badge">{} periods</span>"#, slot.periods)
    } else {
        String::new()
    };
    let (status, prompt) = match slot.status {
        SlotStatus::Marked { present: true } => (r#"<p class="good">Status: Present</p>"#, "Update attendance status"),
        SlotStatus::Marked { present: false } => (r#"<p class="critical">Status: Absent</p>"#, "Update attendance status"),
        SlotStatus::Awaiting => ("", "Mark attendance"),
    };

    format!(
        r#"<article class="card">
  <header><h3>{subject}</h3>{periods}</header>
  {status}
  <p class="muted">{prompt}</p>
  <div class="actions">
    <form method="post" action="/mark"><input type="hidden" name="subject" value="{subject}" /><input type="hidden" name="date" value="{date}" /><input type="hidden" name="status" value="present" /><button class="btn-present" type="submit">Present</button></form>
    <form method="post" action="/mark"><input type="hidden" name="subject" value="{subject}" /><input type="hidden" name="date" value="{date}" /><input type="hidden" name="status" value="absent" /><button class="btn-absent" type="submit">Absent</button></form>
  </div>
</article>"#,
        date = view.date,
    )
}

fn render_subject_stats(subject: &SubjectStats) -> String {
    let class = status_class(subject.status);
    let advice = if subject.attendance_score < SAFE_THRESHOLD {
        let (title, text) = if subject.status == AttendanceStatus::Critical {
            ("Critical Alert!", "Your attendance is critically low. Attend the next")
        } else {
            ("Improvement Needed", "You need to attend the next")
        };
        format!(
            r#"<div class="advice"><strong>{title}</strong><p>{text} {safe} classes to reach 75% (about {ratio} by attended/total).</p></div>"#,
            safe = subject.classes_to_safe_zone,
            ratio = subject.classes_needed_for_75,
        )
    } else {
        String::new()
    };

    format!(
        r#"<article class="card">
  <header><h3>{name}</h3><span class="value {class}">{score:.1}%</span></header>
  <div class="bar"><div class="fill {class}" style="width: {score:.1}%"></div></div>
  <div class="panel">
    <div class="stat"><span class="label">Total</span><span class="value">{total}</span></div>
    <div class="stat"><span class="label">Attended</span><span class="value good">{attended}</span></div>
    <div class="stat"><span class="label">Missed</span><span class="value critical">{missed}</span></div>
    <div class="stat"><span class="label">Status</span><span class="value {class}">{status}</span></div>
  </div>
  <p class="muted">{per_week} per week, about {remaining} left of {projected} this semester ({completion:.0}% done)</p>
  {advice}
</article>"#,
        name = escape(&subject.subject),
        score = subject.attendance_score,
        total = subject.total_classes,
        attended = subject.attended_classes,
        missed = subject.missed_classes,
        status = subject.status.label(),
        per_week = subject.classes_per_week,
        remaining = subject.remaining_classes,
        projected = subject.projected_total,
        completion = subject.completion_percent,
    )
}

fn status_class(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Critical => "critical",
        AttendanceStatus::Warning => "warning",
        AttendanceStatus::Good => "good",
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --good: #2e9d5b;
      --warning: #d69a12;
      --critical: #d6453d;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      justify-items: center;
      padding: 32px 18px 48px;
    }

    main {
      width: min(900px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Georgia", serif;
      margin: 0;
    }

    nav,
    nav form {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      gap: 10px;
    }

    .date {
      font-weight: 600;
      margin-right: auto;
    }

    .btn,
    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font-weight: 600;
      cursor: pointer;
      text-decoration: none;
      background: var(--accent-2);
      color: white;
    }

    .btn-present {
      background: var(--good);
    }

    .btn-absent {
      background: var(--critical);
    }

    .cards,
    .panel {
      display: grid;
      gap: 16px;
    }

    .panel {
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
    }

    .card,
    .stat,
    .holiday {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .card header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .card h3 {
      margin: 0;
    }

    .actions {
      display: flex;
      gap: 12px;
    }

    .stat span {
      display: block;
    }

    .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .value {
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .value.small {
      font-size: 1rem;
    }

    .badge {
      font-size: 0.8rem;
      padding: 4px 10px;
      border-radius: 999px;
      background: rgba(255, 107, 74, 0.15);
      color: var(--accent);
    }

    .muted {
      color: #6b645d;
    }

    .bar {
      height: 10px;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.1);
      overflow: hidden;
    }

    .fill {
      height: 100%;
      background: var(--good);
    }

    .fill.warning {
      background: var(--warning);
    }

    .fill.critical {
      background: var(--critical);
    }

    .good {
      color: var(--good);
    }

    .warning {
      color: var(--warning);
    }

    .critical {
      color: var(--critical);
    }

    .advice {
      border: 1px solid rgba(214, 154, 18, 0.4);
      background: rgba(214, 154, 18, 0.08);
      border-radius: 14px;
      padding: 12px 16px;
    }

    .holiday {
      text-align: center;
    }
  </style>
</head>
<body>
  <main>
    <h1>{{TITLE}}</h1>
    {{NAV}}
    {{BODY}}
  </main>
</body>
</html>
"#;
