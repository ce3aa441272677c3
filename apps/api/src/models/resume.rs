use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// Contact block of a structured resume. Empty strings mean "not present".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    #[serde(deserialize_with = "lenient::text")]
    pub email: String,
    #[serde(deserialize_with = "lenient::text")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::text")]
    pub linkedin: String,
    #[serde(deserialize_with = "lenient::text")]
    pub github: String,
    #[serde(deserialize_with = "lenient::text")]
    pub portfolio: String,
}

impl Contact {
    /// `(label, value)` pairs for every non-empty field, in display order.
    pub fn present_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Email", self.email.as_str()),
            ("Phone", self.phone.as_str()),
            ("LinkedIn", self.linkedin.as_str()),
            ("GitHub", self.github.as_str()),
            ("Portfolio", self.portfolio.as_str()),
        ]
        .into_iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "lenient::text")]
    pub company: String,
    #[serde(alias = "title", deserialize_with = "lenient::text")]
    pub role: String,
    #[serde(deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(alias = "duration", deserialize_with = "lenient::text")]
    pub dates: String,
    #[serde(alias = "bullets", deserialize_with = "lenient::text_list")]
    pub description: Vec<String>,
}

impl ExperienceEntry {
    pub fn is_blank(&self) -> bool {
        self.company.trim().is_empty() && self.role.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    #[serde(alias = "school", deserialize_with = "lenient::text")]
    pub institution: String,
    #[serde(deserialize_with = "lenient::text")]
    pub degree: String,
    #[serde(alias = "duration", deserialize_with = "lenient::text")]
    pub dates: String,
    #[serde(deserialize_with = "lenient::text")]
    pub major: String,
    #[serde(deserialize_with = "lenient::text")]
    pub minor: String,
    #[serde(deserialize_with = "lenient::text")]
    pub gpa: String,
}

impl EducationEntry {
    pub fn is_blank(&self) -> bool {
        self.institution.trim().is_empty() && self.degree.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    #[serde(alias = "name", deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(alias = "technologies", deserialize_with = "lenient::text_list")]
    pub tech: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub description: Vec<String>,
}

impl ProjectEntry {
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty()
    }
}

/// Normalized structured resume: the unit that is parsed, mutated and rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedResume {
    #[serde(alias = "full_name", deserialize_with = "lenient::text")]
    pub name: String,
    pub contact: Contact,
    #[serde(deserialize_with = "lenient::text")]
    pub summary: String,
    #[serde(deserialize_with = "lenient::skill_list")]
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
}

/// Section names used for rendering and fabrication checks, in render order.
pub const SECTION_ORDER: [&str; 5] = ["Summary", "Skills", "Experience", "Education", "Projects"];

impl ParsedResume {
    /// Names of the sections that carry content, in `SECTION_ORDER`.
    pub fn present_sections(&self) -> Vec<&'static str> {
        let present = [
            !self.summary.trim().is_empty(),
            !self.skills.is_empty(),
            self.experience.iter().any(|e| !e.is_blank()),
            self.education.iter().any(|e| !e.is_blank()),
            self.projects.iter().any(|p| !p.is_blank()),
        ];
        SECTION_ORDER
            .iter()
            .zip(present)
            .filter_map(|(name, has)| has.then_some(*name))
            .collect()
    }

    /// Everything populated here but absent from `source`: the name, whole
    /// sections, contact fields, entries with no counterpart in the source, and
    /// entry fields the matching source entry leaves empty. A non-empty result
    /// means content was introduced rather than rearranged.
    ///
    /// Entries are matched by company + role, institution + degree, or project
    /// title, ignoring case and spacing.
    pub fn introduced_fields(&self, source: &ParsedResume) -> Vec<String> {
        let mut introduced = Vec::new();
        if !self.name.trim().is_empty() && source.name.trim().is_empty() {
            introduced.push("Name".to_string());
        }

        let source_sections = source.present_sections();
        let new_sections: Vec<&'static str> = self
            .present_sections()
            .into_iter()
            .filter(|s| !source_sections.contains(s))
            .collect();
        introduced.extend(new_sections.iter().map(|s| s.to_string()));

        let source_contact: Vec<&str> = source
            .contact
            .present_fields()
            .into_iter()
            .map(|(label, _)| label)
            .collect();
        introduced.extend(
            self.contact
                .present_fields()
                .into_iter()
                .map(|(label, _)| label)
                .filter(|label| !source_contact.contains(label))
                .map(str::to_string),
        );

        if !new_sections.contains(&"Experience") {
            for entry in self.experience.iter().filter(|e| !e.is_blank()) {
                let label = format!("Experience '{} @ {}'", entry.role.trim(), entry.company.trim());
                let matched = source.experience.iter().find(|s| {
                    same_text(&s.company, &entry.company) && same_text(&s.role, &entry.role)
                });
                match matched {
                    None => introduced.push(label),
                    Some(src) => collect_new_fields(
                        &mut introduced,
                        &label,
                        &[
                            ("location", &entry.location, &src.location),
                            ("dates", &entry.dates, &src.dates),
                        ],
                        &[("description", &entry.description, &src.description)],
                    ),
                }
            }
        }

        if !new_sections.contains(&"Education") {
            for entry in self.education.iter().filter(|e| !e.is_blank()) {
                let label = format!(
                    "Education '{} - {}'",
                    entry.degree.trim(),
                    entry.institution.trim()
                );
                let matched = source.education.iter().find(|s| {
                    same_text(&s.institution, &entry.institution) && same_text(&s.degree, &entry.degree)
                });
                match matched {
                    None => introduced.push(label),
                    Some(src) => collect_new_fields(
                        &mut introduced,
                        &label,
                        &[
                            ("dates", &entry.dates, &src.dates),
                            ("major", &entry.major, &src.major),
                            ("minor", &entry.minor, &src.minor),
                            ("gpa", &entry.gpa, &src.gpa),
                        ],
                        &[],
                    ),
                }
            }
        }

        if !new_sections.contains(&"Projects") {
            for entry in self.projects.iter().filter(|p| !p.is_blank()) {
                let label = format!("Project '{}'", entry.title.trim());
                match source.projects.iter().find(|s| same_text(&s.title, &entry.title)) {
                    None => introduced.push(label),
                    Some(src) => collect_new_fields(
                        &mut introduced,
                        &label,
                        &[],
                        &[
                            ("tech", &entry.tech, &src.tech),
                            ("description", &entry.description, &src.description),
                        ],
                    ),
                }
            }
        }

        introduced
    }
}

fn same_text(a: &str, b: &str) -> bool {
    a.split_whitespace()
        .map(str::to_lowercase)
        .eq(b.split_whitespace().map(str::to_lowercase))
}

type TextField<'a> = (&'static str, &'a String, &'a String);
type ListField<'a> = (&'static str, &'a Vec<String>, &'a Vec<String>);

/// Records `<label> <field>` for every field populated in the variant entry
/// but empty in its source entry.
fn collect_new_fields(
    introduced: &mut Vec<String>,
    label: &str,
    texts: &[TextField<'_>],
    lists: &[ListField<'_>],
) {
    for &(field, variant, source) in texts {
        if !variant.trim().is_empty() && source.trim().is_empty() {
            introduced.push(format!("{label} {field}"));
        }
    }
    let has = |items: &[String]| items.iter().any(|i| !i.trim().is_empty());
    for &(field, variant, source) in lists {
        if has(variant) && !has(source) {
            introduced.push(format!("{label} {field}"));
        }
    }
}

/// A resume copy re-emphasized for one target role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeVariant {
    #[serde(alias = "optimizedFor", deserialize_with = "lenient::text")]
    pub optimized_for: String,
    #[serde(flatten)]
    pub resume: ParsedResume,
}
