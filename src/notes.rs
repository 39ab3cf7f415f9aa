//! Catalog of documentation pages. Each entry is served at `/{section}/{slug}` from the
//! template `notes/{section}/{slug}`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Note {
    pub section: &'static str,
    pub slug: &'static str,
    pub title: &'static str,
}

impl Note {
    pub fn path(&self) -> String {
        format!("/{}/{}", self.section, self.slug)
    }

    pub fn template(&self) -> String {
        format!("notes/{}/{}", self.section, self.slug)
    }
}

const fn note(section: &'static str, slug: &'static str, title: &'static str) -> Note {
    Note {
        section,
        slug,
        title,
    }
}

static NOTES: &[Note] = &[
    note("basics", "routing", "Routing"),
    note("basics", "middleware", "Middleware"),
    note("basics", "csrf", "CSRF Protection"),
    note("basics", "controllers", "Controllers"),
    note("basics", "requests", "Requests"),
    note("basics", "responses", "Responses"),
    note("basics", "views", "Views"),
    note("basics", "urls", "URL Generation"),
    note("basics", "sessions", "Sessions"),
    note("basics", "validation", "Validation"),
    note("basics", "errors-logging", "Errors & Logging"),
    note("frontend", "blade-templates", "Blade Templates"),
    note("frontend", "localization", "Localization"),
    note("frontend", "scaffolding", "Frontend Scaffolding"),
    note("frontend", "compiling", "Compiling Assets"),
    note("security", "authentication", "Authentication"),
    note("security", "api-auth", "API Authentication"),
    note("security", "authorization", "Authorization"),
    note("security", "encryption", "Encryption"),
    note("security", "hashing", "Hashing"),
    note("security", "passwords", "Password Reset"),
    note("advanced", "artisan", "Artisan Console"),
];

pub fn catalog() -> &'static [Note] {
    NOTES
}

pub fn find(section: &str, slug: &str) -> Option<&'static Note> {
    NOTES
        .iter()
        .find(|n| n.section == section && n.slug == slug)
}

#[derive(Debug, Serialize)]
pub struct Section {
    pub name: &'static str,
    pub notes: Vec<&'static Note>,
}

/// Notes grouped by section, in catalog order.
pub fn sections() -> Vec<Section> {
    let mut out: Vec<Section> = Vec::new();
    for n in NOTES {
        match out.iter_mut().find(|s| s.name == n.section) {
            Some(section) => section.notes.push(n),
            None => out.push(Section {
                name: n.section,
                notes: vec![n],
            }),
        }
    }
    out
}
