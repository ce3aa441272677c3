//! Resume layout: structured resume → styled blocks → lines placed on pages.
//!
//! `layout_resume` decides WHAT is printed (section inclusion and order).
//! `paginate` decides WHERE (word wrap with static metrics, page breaks).
//! Both are pure and deterministic.

use crate::models::ParsedResume;
use crate::render::pdf::to_base14;
use crate::render::metrics::{get_metrics, FontFamily, PageConfig, PT_TO_MM};

/// Visual role of a block. Fixes font, size, indent and spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Name,
    Contact,
    Heading,
    Subheading,
    Body,
    Bullet,
}

impl TextStyle {
    pub fn font(self) -> FontFamily {
        match self {
            TextStyle::Name | TextStyle::Heading | TextStyle::Subheading => FontFamily::HelveticaBold,
            TextStyle::Contact | TextStyle::Body | TextStyle::Bullet => FontFamily::Helvetica,
        }
    }

    pub fn size_pt(self) -> f32 {
        match self {
            TextStyle::Name => 20.0,
            TextStyle::Heading => 13.0,
            TextStyle::Subheading => 11.0,
            TextStyle::Contact | TextStyle::Body | TextStyle::Bullet => 10.0,
        }
    }

    fn indent_mm(self) -> f32 {
        match self {
            TextStyle::Bullet => 4.0,
            _ => 0.0,
        }
    }

    /// Extra space above the block, in points.
    fn space_before_pt(self) -> f32 {
        match self {
            TextStyle::Heading => 10.0,
            TextStyle::Subheading => 4.0,
            _ => 0.0,
        }
    }
}

/// One logical paragraph before wrapping. Text is already mapped onto the
/// base-14 repertoire, so what `paginate` measures is what gets painted.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub style: TextStyle,
    pub text: String,
}

impl Block {
    fn new(style: TextStyle, text: impl AsRef<str>) -> Self {
        Self {
            style,
            text: to_base14(text.as_ref()),
        }
    }
}

/// A wrapped line with its baseline position on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub style: TextStyle,
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
}

pub type PageLines = Vec<PlacedLine>;

const BULLET_MARKER: &str = "- ";

/// Builds the display list: header, then Summary, Skills, Experience, Education,
/// Projects. A section with no content produces no heading at all.
pub fn layout_resume(resume: &ParsedResume) -> Vec<Block> {
    let mut blocks = Vec::new();

    if !resume.name.trim().is_empty() {
        blocks.push(Block::new(TextStyle::Name, resume.name.trim()));
    }
    let contact: Vec<String> = resume
        .contact
        .present_fields()
        .into_iter()
        .map(|(label, value)| format!("{label}: {}", value.trim()))
        .collect();
    if !contact.is_empty() {
        blocks.push(Block::new(TextStyle::Contact, contact.join("  |  ")));
    }

    if !resume.summary.trim().is_empty() {
        blocks.push(Block::new(TextStyle::Heading, "Summary"));
        blocks.push(Block::new(TextStyle::Body, resume.summary.trim()));
    }

    if !resume.skills.is_empty() {
        blocks.push(Block::new(TextStyle::Heading, "Skills"));
        blocks.push(Block::new(TextStyle::Body, resume.skills.join(", ")));
    }

    let experience: Vec<_> = resume.experience.iter().filter(|e| !e.is_blank()).collect();
    if !experience.is_empty() {
        blocks.push(Block::new(TextStyle::Heading, "Experience"));
        for exp in experience {
            let title = join_present(&[&exp.role, &exp.company], " @ ");
            blocks.push(Block::new(TextStyle::Subheading, title));
            let meta = join_present(&[&exp.location, &exp.dates], "  |  ");
            if !meta.is_empty() {
                blocks.push(Block::new(TextStyle::Body, meta));
            }
            for line in &exp.description {
                blocks.push(Block::new(TextStyle::Bullet, line.trim()));
            }
        }
    }

    let education: Vec<_> = resume.education.iter().filter(|e| !e.is_blank()).collect();
    if !education.is_empty() {
        blocks.push(Block::new(TextStyle::Heading, "Education"));
        for edu in education {
            let title = join_present(&[&edu.degree, &edu.institution], " - ");
            blocks.push(Block::new(TextStyle::Subheading, title));

            let mut details = Vec::new();
            if !edu.major.trim().is_empty() {
                details.push(format!("Major: {}", edu.major.trim()));
            }
            if !edu.minor.trim().is_empty() {
                details.push(format!("Minor: {}", edu.minor.trim()));
            }
            if !edu.gpa.trim().is_empty() {
                details.push(format!("GPA: {}", edu.gpa.trim()));
            }
            if !edu.dates.trim().is_empty() {
                details.push(edu.dates.trim().to_string());
            }
            if !details.is_empty() {
                blocks.push(Block::new(TextStyle::Body, details.join("  |  ")));
            }
        }
    }

    let projects: Vec<_> = resume.projects.iter().filter(|p| !p.is_blank()).collect();
    if !projects.is_empty() {
        blocks.push(Block::new(TextStyle::Heading, "Projects"));
        for project in projects {
            blocks.push(Block::new(TextStyle::Subheading, project.title.trim()));
            if !project.tech.is_empty() {
                blocks.push(Block::new(
                    TextStyle::Body,
                    format!("Tech: {}", project.tech.join(", ")),
                ));
            }
            for line in &project.description {
                blocks.push(Block::new(TextStyle::Bullet, line.trim()));
            }
        }
    }

    blocks.retain(|b| !b.text.trim().is_empty());
    blocks
}

fn join_present(parts: &[&String], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Wraps every block to the text width and assigns baselines, breaking onto a
/// new page whenever the next line would cross the bottom margin.
/// Always returns at least one (possibly empty) page.
pub fn paginate(blocks: &[Block], config: &PageConfig) -> Vec<PageLines> {
    let mut pages: Vec<PageLines> = vec![Vec::new()];
    let mut cursor = config.top_mm();

    for block in blocks {
        let style = block.style;
        let metrics = get_metrics(&style.font());
        let size = style.size_pt();
        let line_height = size * config.line_spacing * PT_TO_MM;
        let x = config.margin_mm + style.indent_mm();

        let (first_prefix, rest_indent_mm) = if style == TextStyle::Bullet {
            (BULLET_MARKER, metrics.measure_mm(BULLET_MARKER, size))
        } else {
            ("", 0.0)
        };
        let available_em = (config.text_width_mm() - style.indent_mm() - rest_indent_mm)
            / (size * PT_TO_MM);

        let at_top = pages.last().map_or(true, |p| p.is_empty());
        if !at_top {
            cursor -= style.space_before_pt() * PT_TO_MM;
        }

        for (i, line) in metrics.wrap(&block.text, available_em).into_iter().enumerate() {
            if cursor - line_height < config.margin_mm {
                pages.push(Vec::new());
                cursor = config.top_mm();
            }
            cursor -= line_height;

            let (text, x_mm) = if i == 0 {
                (format!("{first_prefix}{line}"), x)
            } else {
                (line, x + rest_indent_mm)
            };
            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine {
                    style,
                    text,
                    x_mm,
                    y_mm: cursor,
                });
            }
        }
    }

    pages
}
