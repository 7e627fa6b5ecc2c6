//! Document head abstraction.
//!
//! Writers address tags through a [`Selector`]. An existing tag is updated in
//! place and a new one is only created when none matches, so repeated
//! navigation never duplicates tags.

/// Locates a single tag in the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector<'a> {
    /// `meta[name="..."]`
    MetaName(&'a str),
    /// `meta[property="..."]`
    MetaProperty(&'a str),
    /// `link[rel="..."]`
    LinkRel(&'a str),
}

pub trait DocumentHead {
    fn set_title(&mut self, title: &str);
    /// The `lang` attribute of the root element.
    fn set_language(&mut self, language: &str);
    fn upsert(&mut self, selector: Selector<'_>, value: &str);
    /// Drop the tag matching `selector`, if any.
    fn remove(&mut self, selector: Selector<'_>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    MetaName,
    MetaProperty,
    LinkRel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadTag {
    pub kind: TagKind,
    pub key: String,
    pub value: String,
}

impl HeadTag {
    fn matches(&self, selector: Selector<'_>) -> bool {
        let (kind, key) = split(selector);
        self.kind == kind && self.key == key
    }
}

fn split(selector: Selector<'_>) -> (TagKind, &str) {
    match selector {
        Selector::MetaName(key) => (TagKind::MetaName, key),
        Selector::MetaProperty(key) => (TagKind::MetaProperty, key),
        Selector::LinkRel(key) => (TagKind::LinkRel, key),
    }
}

/// In-memory document head, renderable to HTML for server-side output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadModel {
    title: Option<String>,
    language: Option<String>,
    tags: Vec<HeadTag>,
    mutations: u64,
}

impl HeadModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn get(&self, selector: Selector<'_>) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.matches(selector))
            .map(|tag| tag.value.as_str())
    }

    /// Number of tags matching `selector`; never more than one.
    pub fn count(&self, selector: Selector<'_>) -> usize {
        self.tags.iter().filter(|tag| tag.matches(selector)).count()
    }

    pub fn tags(&self) -> &[HeadTag] {
        &self.tags
    }

    /// Total writes applied so far.
    pub fn mutations(&self) -> u64 {
        self.mutations
    }

    pub fn render(&self) -> String {
        let mut html = String::new();
        if let Some(title) = &self.title {
            html.push_str(&format!("<title>{}</title>\n", escape(title)));
        }
        for tag in &self.tags {
            let line = match tag.kind {
                TagKind::MetaName => format!(
                    "<meta name=\"{}\" content=\"{}\">",
                    escape(&tag.key),
                    escape(&tag.value)
                ),
                TagKind::MetaProperty => format!(
                    "<meta property=\"{}\" content=\"{}\">",
                    escape(&tag.key),
                    escape(&tag.value)
                ),
                TagKind::LinkRel => format!(
                    "<link rel=\"{}\" href=\"{}\">",
                    escape(&tag.key),
                    escape(&tag.value)
                ),
            };
            html.push_str(&line);
            html.push('\n');
        }
        html
    }
}

impl DocumentHead for HeadModel {
    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
        self.mutations += 1;
    }

    fn set_language(&mut self, language: &str) {
        self.language = Some(language.to_string());
        self.mutations += 1;
    }

    fn upsert(&mut self, selector: Selector<'_>, value: &str) {
        match self.tags.iter_mut().find(|tag| tag.matches(selector)) {
            Some(existing) => existing.value = value.to_string(),
            None => {
                let (kind, key) = split(selector);
                self.tags.push(HeadTag {
                    kind,
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }
        self.mutations += 1;
    }

    fn remove(&mut self, selector: Selector<'_>) {
        let before = self.tags.len();
        self.tags.retain(|tag| !tag.matches(selector));
        if self.tags.len() != before {
            self.mutations += 1;
        }
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_updates_in_place() {
        let mut head = HeadModel::new();
        head.upsert(Selector::MetaName("description"), "first");
        head.upsert(Selector::MetaName("description"), "second");
        head.upsert(Selector::MetaProperty("description"), "og");

        assert_eq!(head.count(Selector::MetaName("description")), 1);
        assert_eq!(head.get(Selector::MetaName("description")), Some("second"));
        assert_eq!(head.get(Selector::MetaProperty("description")), Some("og"));
        assert_eq!(head.tags().len(), 2);
        assert_eq!(head.mutations(), 3);
    }

    #[test]
    fn test_remove_only_touches_matching_tag() {
        let mut head = HeadModel::new();
        head.upsert(Selector::LinkRel("canonical"), "https://x.test/courses");
        head.upsert(Selector::MetaProperty("og:url"), "https://x.test/courses");

        head.remove(Selector::LinkRel("canonical"));
        head.remove(Selector::LinkRel("canonical"));

        assert_eq!(head.get(Selector::LinkRel("canonical")), None);
        assert_eq!(head.get(Selector::MetaProperty("og:url")), Some("https://x.test/courses"));
        assert_eq!(head.mutations(), 3);
    }

    #[test]
    fn test_render_escapes_values() {
        let mut head = HeadModel::new();
        head.set_title("Cranes & Loaders");
        head.upsert(Selector::LinkRel("canonical"), "https://x.test/?a=\"1\"");
        let html = head.render();
        assert!(html.contains("<title>Cranes &amp; Loaders</title>"));
        assert!(html.contains("<link rel=\"canonical\" href=\"https://x.test/?a=&quot;1&quot;\">"));
    }
}
