use tracing::{debug, warn};

use crate::catalog::{filter_listing, CatalogEntry, CatalogError, Category, Listing, CATEGORY_CHOICES};

/// One request the page wants made. Results come back with the same ticket.
/// `page` tells apart successive openings of the screen, `request` the fetches within one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
  pub page: u64,
  pub request: u64,
  pub category: Category
}

/// State of the catalog screen. Lives exactly as long as the screen does.
#[derive(Debug, Clone)]
pub struct ProductsPage {
  page: u64,
  tab: Category,
  listing: Listing,
  search: String,
  category_filter: String,
  loading: bool,
  latest_request: u64,
  selected: usize
}

impl ProductsPage {
  /// Opens on the machines tab. The returned ticket is the initial load.
  /// `page` must differ from every earlier opening's.
  pub fn open(page: u64) -> (Self, FetchTicket) {
    let mut page = ProductsPage {
      page,
      tab: Category::Machines,
      listing: Listing::empty(Category::Machines),
      search: String::new(),
      category_filter: String::new(),
      loading: false,
      latest_request: 0,
      selected: 0
    };

    let ticket = page.reload();
    (page, ticket)
  }

  pub fn tab(&self) -> Category { self.tab }
  pub fn search(&self) -> &str { &self.search }
  pub fn category_filter(&self) -> &str { &self.category_filter }
  pub fn is_loading(&self) -> bool { self.loading }
  pub fn selected(&self) -> usize { self.selected }
  pub fn listing(&self) -> &Listing { &self.listing }

  /// Switches tabs: drops the current list and both filters, then asks for the new list.
  /// Selecting the tab that's already open does nothing.
  pub fn select_tab(&mut self, tab: Category) -> Option<FetchTicket> {
    if tab == self.tab {
      return None;
    }

    self.tab = tab;
    self.clear_filters();
    Some(self.reload())
  }

  fn reload(&mut self) -> FetchTicket {
    self.latest_request += 1;
    self.listing = Listing::empty(self.tab);
    self.loading = true;
    self.selected = 0;

    FetchTicket { page: self.page, request: self.latest_request, category: self.tab }
  }

  /// Stores a finished fetch. Anything but the newest request of this opening is
  /// dropped so a slow answer for an old tab can't overwrite the current one.
  pub fn apply(&mut self, ticket: FetchTicket, result: Result<Listing, CatalogError>) {
    if ticket.page != self.page || ticket.request != self.latest_request || ticket.category != self.tab {
      debug!(page = ticket.page, request = ticket.request, category = %ticket.category, "dropping superseded listing");
      return;
    }

    self.loading = false;
    self.selected = 0;

    match result {
      Ok(listing) => self.listing = listing,
      Err(e) => {
        // shows up as "no results", same as an empty catalog
        warn!(category = %ticket.category, error = %e, "failed to fetch listing");
        self.listing = Listing::empty(ticket.category);
      }
    }
  }

  /// The entries currently on screen
  pub fn visible(&self) -> Vec<&CatalogEntry> {
    filter_listing(&self.listing, &self.search, &self.category_filter)
  }

  pub fn selected_entry(&self) -> Option<&CatalogEntry> {
    self.visible().get(self.selected).copied()
  }

  pub fn push_search(&mut self, c: char) {
    self.search.push(c);
    self.selected = 0;
  }

  pub fn pop_search(&mut self) {
    self.search.pop();
    self.selected = 0;
  }

  /// Steps through the category selector, "" counts as "All"
  pub fn cycle_category(&mut self) {
    let current = CATEGORY_CHOICES.iter().position(|c| *c == self.category_filter).unwrap_or(0);
    self.category_filter = CATEGORY_CHOICES[(current + 1) % CATEGORY_CHOICES.len()].to_string();
    self.selected = 0;
  }

  pub fn clear_filters(&mut self) {
    self.search.clear();
    self.category_filter.clear();
    self.selected = 0;
  }

  pub fn move_selection(&mut self, delta: isize) {
    let count = self.visible().len();
    if count == 0 {
      self.selected = 0;
      return;
    }

    let next = self.selected as isize + delta;
    self.selected = next.clamp(0, count as isize - 1) as usize;
  }
}
