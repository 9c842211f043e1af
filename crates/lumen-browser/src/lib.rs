//! Document loading pipeline for the lumen renderer.
//!
//! # Scope
//!
//! This crate drives the whole pipeline for one page:
//! - **Document Loading** - fetch the document through a [`Fetch`]
//!   implementation and parse it (or show its source for `view-source:`)
//! - **Stylesheets** - the default rules, then `<link>` and `<style>` sheets
//!   in document order; a sheet that fails to load is skipped
//! - **Style Computation** - stable specificity sort and cascade
//! - **Layout and Painting** - box tree and display list for the viewport
//! - **Hit Testing** - mapping points back to links and form controls
//!
//! # Not Implemented
//!
//! - Navigation history, scrolling and event dispatch (left to the embedder)
//! - Script execution and images

pub mod config;
pub mod hit_test;
pub mod stylesheets;

pub use config::BrowserConfig;
pub use hit_test::{Action, form_data};
pub use lumen_css as css;
pub use lumen_dom as dom;
pub use lumen_html as html;
pub use stylesheets::{StylesheetSource, collect_stylesheet_sources};

use lumen_common::net::{Fetch, FetchError};
use lumen_common::url::resolve_url;
use lumen_common::warning::{clear_warnings, warn_once};
use lumen_css::{
    ApproximateFontMetrics, DisplayList, FontMetrics, LayoutBox, Painter, Rule, StyleTable,
    compute_styles, layout_document, parse_stylesheet, sort_by_specificity, ua_rules,
};
use lumen_dom::{DomTree, NodeId};
use thiserror::Error;

/// URL prefix that shows a document's markup instead of rendering it.
pub const VIEW_SOURCE_PREFIX: &str = "view-source:";

/// Error type for document loading.
///
/// Only the document itself can fail a load; stylesheet failures are logged
/// and skipped.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document could not be fetched.
    #[error("failed to load document: {0}")]
    Fetch(#[from] FetchError),
}

/// A loaded, styled and laid out document.
///
/// The content tree and its styles are fixed once loaded; resizing, focus
/// changes and input values only re-run layout and painting.
pub struct Page {
    url: Option<String>,
    view_source: bool,
    tree: DomTree,
    styles: StyleTable,
    rule_count: usize,
    layout: LayoutBox,
    display_list: DisplayList,
    viewport_width: i32,
    viewport_height: i32,
    focus: Option<NodeId>,
    metrics: Box<dyn FontMetrics>,
}

impl Page {
    /// Fetch and render `url`.
    ///
    /// # Algorithm
    ///
    /// STEP 1: Strip a `view-source:` prefix and fetch the document.
    ///
    /// STEP 2: Parse it, in view-source mode if the prefix was present.
    ///
    /// STEP 3: Collect the default rules, then every page stylesheet in
    ///         document order. Linked sheets are resolved against the
    ///         document URL and fetched; failures are skipped.
    ///
    /// STEP 4: Stably sort by specificity, cascade, lay out and paint.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Fetch`] if the document itself cannot be fetched.
    pub fn load(url: &str, fetcher: &dyn Fetch, config: &BrowserConfig) -> Result<Self, LoadError> {
        Self::load_with_metrics(url, fetcher, config, Box::new(ApproximateFontMetrics))
    }

    /// [`Page::load`] with custom text measurement.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Fetch`] if the document itself cannot be fetched.
    pub fn load_with_metrics(
        url: &str,
        fetcher: &dyn Fetch,
        config: &BrowserConfig,
        metrics: Box<dyn FontMetrics>,
    ) -> Result<Self, LoadError> {
        clear_warnings();

        // STEP 1
        let (target, view_source) = match url.strip_prefix(VIEW_SOURCE_PREFIX) {
            Some(rest) => (rest, true),
            None => (url, false),
        };
        log::info!(target: "lumen::browser", "loading {target}");
        let response = fetcher.fetch(target)?;

        // STEP 2-4
        Ok(Self::build(
            &response.body,
            Some(target),
            view_source,
            fetcher,
            config,
            metrics,
        ))
    }

    /// Render markup that is already in memory. Relative stylesheet links
    /// are resolved against `base_url` if given.
    #[must_use]
    pub fn from_html(
        html: &str,
        base_url: Option<&str>,
        fetcher: &dyn Fetch,
        config: &BrowserConfig,
    ) -> Self {
        clear_warnings();
        Self::build(
            html,
            base_url,
            false,
            fetcher,
            config,
            Box::new(ApproximateFontMetrics),
        )
    }

    fn build(
        html: &str,
        base_url: Option<&str>,
        view_source: bool,
        fetcher: &dyn Fetch,
        config: &BrowserConfig,
        metrics: Box<dyn FontMetrics>,
    ) -> Self {
        // STEP 2
        let tree = if view_source {
            lumen_html::parse_view_source(html)
        } else {
            lumen_html::parse(html)
        };

        // STEP 3
        let mut rules = ua_rules().to_vec();
        rules.extend(page_rules(&tree, base_url, fetcher));

        // STEP 4
        sort_by_specificity(&mut rules);
        let styles = compute_styles(&tree, &rules);
        log::info!(
            target: "lumen::browser",
            "styled {} nodes with {} rules",
            tree.len(),
            rules.len()
        );

        let layout = layout_document(&tree, &styles, config.viewport_width, metrics.as_ref());
        let display_list = Painter::new(&tree, &styles, metrics.as_ref()).paint(&layout);

        Self {
            url: base_url.map(str::to_string),
            view_source,
            tree,
            styles,
            rule_count: rules.len(),
            layout,
            display_list,
            viewport_width: config.viewport_width,
            viewport_height: config.viewport_height,
            focus: None,
            metrics,
        }
    }

    /// Re-run layout and painting over the existing styled tree.
    fn relayout(&mut self) {
        self.layout = layout_document(
            &self.tree,
            &self.styles,
            self.viewport_width,
            self.metrics.as_ref(),
        );
        self.repaint();
    }

    fn repaint(&mut self) {
        self.display_list = Painter::new(&self.tree, &self.styles, self.metrics.as_ref())
            .with_focus(self.focus)
            .paint(&self.layout);
        log::debug!(
            target: "lumen::browser",
            "painted {} commands",
            self.display_list.len()
        );
    }

    /// The document URL, if the page was fetched or given a base.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// True if the page shows markup source.
    #[must_use]
    pub const fn is_view_source(&self) -> bool {
        self.view_source
    }

    /// The content tree.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Resolved styles for every node.
    #[must_use]
    pub const fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// Number of rules the cascade ran with, default rules included.
    #[must_use]
    pub const fn rule_count(&self) -> usize {
        self.rule_count
    }

    /// The box tree from the last layout.
    #[must_use]
    pub const fn layout(&self) -> &LayoutBox {
        &self.layout
    }

    /// The display list from the last paint.
    #[must_use]
    pub const fn display_list(&self) -> &DisplayList {
        &self.display_list
    }

    /// Current viewport size.
    #[must_use]
    pub const fn viewport(&self) -> (i32, i32) {
        (self.viewport_width, self.viewport_height)
    }

    /// Bottom edge of the laid out document.
    #[must_use]
    pub const fn content_height(&self) -> i32 {
        self.layout.rect.bottom()
    }

    /// The focused form control.
    #[must_use]
    pub const fn focus(&self) -> Option<NodeId> {
        self.focus
    }

    /// Lay the page out again for a new viewport. Nothing is re-fetched or
    /// re-parsed.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.viewport_height = height;
        if width == self.viewport_width {
            return;
        }
        self.viewport_width = width;
        self.relayout();
    }

    /// Focus a form control, or clear focus with `None`.
    pub fn set_focus(&mut self, focus: Option<NodeId>) {
        if self.focus != focus {
            self.focus = focus;
            self.repaint();
        }
    }

    /// Replace the `value` of a text input and re-render. Returns the
    /// previous value, or `None` without effect if `node` is not an input.
    pub fn set_input_value(&mut self, node: NodeId, value: &str) -> Option<String> {
        if !self.tree.is_element_named(node, "input") {
            return None;
        }
        let previous = self
            .tree
            .set_attribute(node, "value", value)
            .unwrap_or_default();
        self.relayout();
        Some(previous)
    }

    /// The content node under a point in document coordinates.
    #[must_use]
    pub fn hit_test(&self, x: i32, y: i32) -> Option<NodeId> {
        hit_test::node_at(&self.layout, x, y)
    }

    /// What clicking a point in document coordinates would do.
    #[must_use]
    pub fn actionable_at(&self, x: i32, y: i32) -> Option<Action> {
        let node = self.hit_test(x, y)?;
        hit_test::actionable(&self.tree, node, self.url.as_deref())
    }
}

/// Parse every page stylesheet of `tree` in document order.
fn page_rules(tree: &DomTree, base_url: Option<&str>, fetcher: &dyn Fetch) -> Vec<Rule> {
    let mut rules = Vec::new();
    for source in collect_stylesheet_sources(tree) {
        match source {
            StylesheetSource::Inline { text } => rules.extend(parse_stylesheet(&text)),
            StylesheetSource::Link { href } => {
                let url = resolve_url(&href, base_url);
                match fetcher.fetch(&url) {
                    Ok(response) => rules.extend(parse_stylesheet(&response.body)),
                    Err(err) => {
                        warn_once("Browser", &format!("skipping stylesheet '{url}': {err}"));
                    }
                }
            }
        }
    }
    rules
}
