use std::fmt::Write;

use crate::catalog::models::{Catalog, RoadmapEntry};

const TITLE: &str = "🎓 PATHFINDER ROADMAP 🎓";
const RULE_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy)]
enum Section {
    Core,
    Technical,
    Projects,
    Certifications,
    Internships,
    Career,
    Advice,
}

/// Section headings in rendering order.
const SECTIONS: &[(&str, Section)] = &[
    ("📚 Core Subjects", Section::Core),
    ("🛠 Technical Skills", Section::Technical),
    ("🚀 Projects & Research", Section::Projects),
    ("📜 Professional Certifications", Section::Certifications),
    ("🏢 Internships & Practical", Section::Internships),
    ("💼 Career Trajectories", Section::Career),
    ("💡 Expert Advice", Section::Advice),
];

impl Section {
    fn items(self, entry: &RoadmapEntry) -> &[String] {
        match self {
            Section::Core => entry.core(),
            Section::Technical => entry.technical(),
            Section::Projects => entry.projects(),
            Section::Certifications => entry.certifications(),
            Section::Internships => entry.internships(),
            Section::Career => entry.career(),
            Section::Advice => entry.advice(),
        }
    }
}

/// A rendered roadmap ready to be served as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapExport {
    pub filename: String,
    pub content: String,
}

/// Renders the leaf at `course/branch/year`, or `None` if any key is absent.
pub fn export(catalog: &Catalog, course: &str, branch: &str, year: &str) -> Option<RoadmapExport> {
    let entry = catalog.leaf(course, branch, year)?;
    Some(RoadmapExport {
        filename: export_filename(course, branch, year),
        content: render_roadmap(course, branch, year, entry),
    })
}

pub fn export_filename(course: &str, branch: &str, year: &str) -> String {
    format!("Roadmap_{course}_{branch}_Year{year}.txt").replace(' ', "_")
}

pub fn render_roadmap(course: &str, branch: &str, year: &str, entry: &RoadmapEntry) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "Course: {course}");
    let _ = writeln!(out, "Branch: {branch}");
    let _ = writeln!(out, "Year: {year}");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push_str("\n\n");

    for (title, section) in SECTIONS {
        let items = section.items(entry);
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{title}");
        out.push_str(&"-".repeat(title.chars().count()));
        out.push('\n');
        for item in items {
            let _ = writeln!(out, " • {item}");
        }
        out.push('\n');
    }

    out
}
