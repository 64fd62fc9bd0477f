//! Export renderers for repository implementations.

use std::fmt::Write as _;

use crate::resume::Resume;

use super::repository::{ExportFormat, ExportedFile, RepositoryError};

/// Renders `resume` in `format`, naming the file after the candidate.
pub fn render(resume: &Resume, format: ExportFormat) -> Result<ExportedFile, RepositoryError> {
    let contents = match format {
        ExportFormat::Json => serde_json::to_string_pretty(&resume.to_json())?,
        ExportFormat::Markdown => render_markdown(resume),
    };
    Ok(ExportedFile {
        format,
        file_name: format!("{}.{}", slug(&resume.basics().name), format.extension()),
        contents,
    })
}

/// Renders a readable Markdown document.
pub fn render_markdown(resume: &Resume) -> String {
    let mut out = String::new();
    let basics = resume.basics();

    let _ = writeln!(out, "# {}", basics.name);
    if let Some(label) = &basics.label {
        let _ = writeln!(out, "{}", label);
    }
    out.push('\n');

    let contact: Vec<&str> = [Some(&basics.email), basics.phone.as_ref(), basics.url.as_ref()]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();
    let _ = writeln!(out, "{}", contact.join(" | "));

    if let Some(summary) = basics.summary.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(out, "\n## Summary\n\n{}\n", summary);
    }

    if !resume.work().is_empty() {
        out.push_str("\n## Experience\n");
        for job in resume.work() {
            let _ = write!(out, "\n### {}, {}\n", job.position, job.name);
            let _ = writeln!(out, "{}", span(Some(&job.start_date), job.end_date.as_ref()));
            if let Some(summary) = job.summary.as_deref().filter(|s| !s.is_empty()) {
                let _ = write!(out, "\n{}\n", summary);
            }
            bullets(&mut out, job.highlights.as_deref());
        }
    }

    if !resume.education().is_empty() {
        out.push_str("\n## Education\n");
        for school in resume.education() {
            let title = match (&school.study_type, &school.area) {
                (Some(kind), Some(area)) => format!("{} in {}, {}", kind, area, school.institution),
                (Some(kind), None) => format!("{}, {}", kind, school.institution),
                (None, Some(area)) => format!("{}, {}", area, school.institution),
                (None, None) => school.institution.clone(),
            };
            let _ = write!(out, "\n### {}\n", title);
            if school.start_date.is_some() || school.end_date.is_some() {
                let _ = writeln!(out, "{}", span(school.start_date.as_ref(), school.end_date.as_ref()));
            }
        }
    }

    if !resume.skills().is_empty() {
        out.push_str("\n## Skills\n\n");
        for skill in resume.skills() {
            match skill.keywords.as_deref() {
                Some(keywords) if !keywords.is_empty() => {
                    let _ = writeln!(out, "- **{}**: {}", skill.name, keywords.join(", "));
                }
                _ => {
                    let _ = writeln!(out, "- **{}**", skill.name);
                }
            }
        }
    }

    if !resume.projects().is_empty() {
        out.push_str("\n## Projects\n");
        for project in resume.projects() {
            let _ = write!(out, "\n### {}\n", project.name);
            if let Some(description) = project.description.as_deref().filter(|s| !s.is_empty()) {
                let _ = write!(out, "\n{}\n", description);
            }
            bullets(&mut out, project.highlights.as_deref());
        }
    }

    out
}

fn span(start: Option<&String>, end: Option<&String>) -> String {
    let end = end.map(String::as_str).filter(|s| !s.is_empty()).unwrap_or("present");
    match start.map(String::as_str).filter(|s| !s.is_empty()) {
        Some(start) => format!("{} to {}", start, end),
        None => format!("until {}", end),
    }
}

fn bullets(out: &mut String, items: Option<&[String]>) {
    let Some(items) = items.filter(|items| !items.is_empty()) else {
        return;
    };
    out.push('\n');
    for item in items {
        let _ = writeln!(out, "- {}", item);
    }
}

fn slug(name: &str) -> String {
    let slug = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "resume".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resume() -> Resume {
        Resume::parse(&json!({
            "basics": {"name": "Jane Q. Doe", "email": "jane@example.com", "label": "Backend Engineer"},
            "work": [{
                "name": "Acme",
                "position": "Engineer",
                "startDate": "2020-01-01",
                "highlights": ["Cut p99 latency by 40%"]
            }],
            "skills": [{"name": "Rust", "keywords": ["tokio", "serde"]}]
        }))
        .unwrap()
    }

    #[test]
    fn test_markdown_sections() {
        let md = render_markdown(&resume());
        assert!(md.starts_with("# Jane Q. Doe\nBackend Engineer\n"));
        assert!(md.contains("### Engineer, Acme\n2020-01-01 to present\n"));
        assert!(md.contains("- Cut p99 latency by 40%"));
        assert!(md.contains("- **Rust**: tokio, serde"));
        assert!(!md.contains("## Education"));
    }

    #[test]
    fn test_json_export_round_trips() {
        let resume = resume();
        let file = render(&resume, ExportFormat::Json).unwrap();
        assert_eq!(file.file_name, "jane-q-doe.json");
        let parsed: serde_json::Value = serde_json::from_str(&file.contents).unwrap();
        assert_eq!(parsed, resume.to_json());
    }
}
