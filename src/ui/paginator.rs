//! # PageSlicer
//!
//! Client-side pagination over a caller-owned result set.
//!
//! ## Page arithmetic
//!
//! ```text
//! total_pages = max(1, ceil(len / page_size))
//! slice       = data[(page - 1) * page_size .. min(page * page_size, len)]
//! ```
//!
//! An empty result set still has one (empty) page, so `current_page` is
//! always a valid 1-based index. Requests outside `[1, total_pages]` clamp.
//!
//! ## Rendering
//!
//! `render()` calls the item callback once per item of the current slice, in
//! order, then rebuilds the page index (one [`PageButton`] per page). With a
//! single page the index is empty.
//!
//! The slicer is an explicit context object: create it, drive it with
//! `go_to`/`set_data`, drop it when the view goes away.

use log::debug;

use crate::core::events::UiEvent;

/// One entry of the page-index control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub number: usize,
    pub active: bool,
}

pub struct PageSlicer<T, F> {
    data: Vec<T>,
    page_size: usize,
    current_page: usize,
    total_pages: usize,
    render_item: F,
    index: Vec<PageButton>,
}

fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size).max(1)
}

impl<T, F: FnMut(&T)> PageSlicer<T, F> {
    /// Sets up state on page 1 without rendering. A page size of 0 is treated as 1.
    pub fn new(data: Vec<T>, page_size: usize, render_item: F) -> Self {
        let page_size = page_size.max(1);
        Self {
            total_pages: page_count(data.len(), page_size),
            data,
            page_size,
            current_page: 1,
            render_item,
            index: Vec::new(),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// The page-index control as of the last render.
    pub fn index(&self) -> &[PageButton] {
        &self.index
    }

    /// Items on the current page.
    pub fn current_slice(&self) -> &[T] {
        let start = ((self.current_page - 1) * self.page_size).min(self.data.len());
        let end = (start + self.page_size).min(self.data.len());
        &self.data[start..end]
    }

    pub fn render(&mut self) {
        let start = ((self.current_page - 1) * self.page_size).min(self.data.len());
        let end = (start + self.page_size).min(self.data.len());
        for item in &self.data[start..end] {
            (self.render_item)(item);
        }
        self.render_index();
    }

    fn render_index(&mut self) {
        self.index.clear();
        if self.total_pages <= 1 {
            return;
        }
        self.index.extend((1..=self.total_pages).map(|number| PageButton {
            number,
            active: number == self.current_page,
        }));
    }

    /// Jumps to `page`, clamped into `[1, total_pages]`, and renders.
    pub fn go_to(&mut self, page: i64) {
        let last = i64::try_from(self.total_pages).unwrap_or(i64::MAX);
        // clamp bounds are both >= 1, so the cast back is lossless
        self.current_page = page.clamp(1, last) as usize;
        debug!("PageSlicer: page {}/{}", self.current_page, self.total_pages);
        self.render();
    }

    /// Replaces the data, returns to page 1 and renders.
    pub fn set_data(&mut self, data: Vec<T>) {
        self.total_pages = page_count(data.len(), self.page_size);
        self.data = data;
        self.current_page = 1;
        self.render();
    }

    /// Routes page clicks; other events are ignored.
    pub fn handle_event(&mut self, event: &UiEvent) {
        if let UiEvent::PageSelected(page) = event {
            self.go_to(i64::try_from(*page).unwrap_or(i64::MAX));
        }
    }

    /// Disposes the slicer, handing the data back.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }
}
