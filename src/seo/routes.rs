//! Route path to SEO slug mapping.

/// Public pages with their own dataset entry.
const EXACT_ROUTES: &[(&str, &str)] = &[
    ("/", "home"),
    ("/about", "about"),
    ("/courses", "courses"),
    ("/gallery", "gallery"),
    ("/testimonials", "testimonials"),
    ("/contact", "contact"),
    ("/enroll", "enrollment"),
    ("/faq", "faq"),
    ("/partner-program", "partner-program"),
    ("/privacy-policy", "privacy-policy"),
    ("/terms", "terms"),
];

/// Pages sharing one generic entry, e.g. every course detail page.
const PREFIX_ROUTES: &[(&str, &str)] = &[
    ("/courses/", "course-detail"),
    ("/gallery/", "gallery"),
];

/// Internal areas that never receive SEO metadata.
const EXCLUDED_ROOTS: &[&str] = &["/admin", "/login"];

/// Strip query and fragment, lowercase, and drop any trailing slash.
pub fn normalize_path(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim().trim_end_matches('/').to_ascii_lowercase();
    if trimmed.starts_with('/') {
        trimmed
    } else {
        format!("/{}", trimmed)
    }
}

pub fn is_excluded(path: &str) -> bool {
    let path = normalize_path(path);
    EXCLUDED_ROOTS.iter().any(|root| {
        path == *root
            || path
                .strip_prefix(root)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Slug for a route, or `None` when the route gets no metadata.
pub fn slug_for_path(path: &str) -> Option<&'static str> {
    if is_excluded(path) {
        return None;
    }
    let path = normalize_path(path);

    if let Some((_, slug)) = EXACT_ROUTES.iter().find(|(route, _)| *route == path) {
        return Some(slug);
    }

    PREFIX_ROUTES
        .iter()
        .find(|(prefix, _)| path.len() > prefix.len() && path.starts_with(prefix))
        .map(|(_, slug)| *slug)
}
