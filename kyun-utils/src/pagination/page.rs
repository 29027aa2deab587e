//! Page model and chunking of rendered entries into fixed-capacity pages.

use crate::embed::DEFAULT_EMBED_COLOR;

/// One inline or block field rendered under a page description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Caller-rendered content of a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBody {
    pub title: String,
    pub description: String,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
    pub fields: Vec<PageField>,
    pub color: u32,
}

impl PageBody {
    /// Create a body with a title and an empty description.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            url: None,
            thumbnail: None,
            fields: Vec::new(),
            color: DEFAULT_EMBED_COLOR,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(PageField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }
}

/// An immutable, position-stamped page of a [`PageSet`].
///
/// Ordinal and total are only assigned by [`PageSet::from_bodies`], so the
/// footer is always consistent with the set the page belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPage {
    ordinal: usize,
    total: usize,
    body: PageBody,
}

impl ContentPage {
    /// 1-based position of this page.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Number of pages in the owning set.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn body(&self) -> &PageBody {
        &self.body
    }

    /// Page indicator shown under the page content.
    pub fn footer(&self) -> String {
        format!("Page {} of {}", self.ordinal, self.total)
    }
}

/// Ordered sequence of stamped pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSet {
    pages: Vec<ContentPage>,
}

impl PageSet {
    /// Stamp ordinals and totals onto already-rendered bodies.
    pub fn from_bodies(bodies: Vec<PageBody>) -> Self {
        let total = bodies.len();
        let pages = bodies
            .into_iter()
            .enumerate()
            .map(|(index, body)| ContentPage {
                ordinal: index + 1,
                total,
                body,
            })
            .collect();

        Self { pages }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ContentPage> {
        self.pages.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentPage> {
        self.pages.iter()
    }
}

/// Compute the number of pages for a paginated list.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1))
}

/// Standard list template: fixed title and a `Total : N` header on every page.
pub fn list_page_template(title: impl Into<String>) -> impl Fn(usize) -> PageBody {
    let title = title.into();
    move |total| PageBody::new(title.clone()).description(format!("Total : {total}\n\n"))
}

/// Split rendered entries into pages of at most `capacity` entries.
///
/// `template` receives the overall entry count and seeds each page body;
/// entries are appended to the seeded description one per line. No entries
/// yields an empty set, which callers must report instead of browsing.
pub fn chunk_entries<F>(entries: &[String], capacity: usize, template: F) -> PageSet
where
    F: Fn(usize) -> PageBody,
{
    let capacity = capacity.max(1);
    let entry_count = entries.len();
    let mut bodies = Vec::with_capacity(total_pages(entry_count, capacity));
    let mut current: Option<(PageBody, usize)> = None;

    for entry in entries {
        let (body, count) = current.get_or_insert_with(|| (template(entry_count), 0));
        body.description.push_str(entry);
        body.description.push('\n');
        *count += 1;

        if *count == capacity
            && let Some((full, _)) = current.take()
        {
            bodies.push(full);
        }
    }

    if let Some((partial, _)) = current {
        bodies.push(partial);
    }

    PageSet::from_bodies(bodies)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(count: usize) -> Vec<String> {
        (1..=count).map(|index| format!("entry #{index}")).collect()
    }

    fn page_entries(page: &ContentPage) -> Vec<String> {
        page.body()
            .description
            .lines()
            .filter(|line| line.starts_with("entry #"))
            .map(ToOwned::to_owned)
            .collect()
    }

    #[test]
    fn chunking_is_lossless_and_ordered() {
        for count in 1..=35 {
            for capacity in 1..=12 {
                let input = entries(count);
                let pages = chunk_entries(&input, capacity, list_page_template("List"));

                assert_eq!(pages.len(), count.div_ceil(capacity));
                let rebuilt: Vec<String> = pages.iter().flat_map(page_entries).collect();
                assert_eq!(rebuilt, input);
            }
        }
    }

    #[test]
    fn twenty_three_entries_make_three_pages() {
        let pages = chunk_entries(&entries(23), 10, list_page_template("Watching list"));

        let sizes: Vec<usize> = pages.iter().map(|page| page_entries(page).len()).collect();
        assert_eq!(sizes, vec![10, 10, 3]);

        let footers: Vec<String> = pages.iter().map(ContentPage::footer).collect();
        assert_eq!(footers, vec!["Page 1 of 3", "Page 2 of 3", "Page 3 of 3"]);
    }

    #[test]
    fn every_page_repeats_total_header() {
        let pages = chunk_entries(&entries(23), 10, list_page_template("Watching list"));

        for page in pages.iter() {
            assert!(page.body().description.starts_with("Total : 23\n\n"));
            assert_eq!(page.body().title, "Watching list");
        }
    }

    #[test]
    fn no_entries_yield_empty_set() {
        let pages = chunk_entries(&[], 10, list_page_template("Empty"));
        assert!(pages.is_empty());
        assert_eq!(pages.len(), 0);
    }

    #[test]
    fn zero_capacity_is_treated_as_one() {
        let pages = chunk_entries(&entries(3), 0, list_page_template("List"));
        assert_eq!(pages.len(), 3);
    }
}
