use std::{io, sync::Arc};
use futures::{future::{select, Either}, Stream, StreamExt};
use termion::event::Key;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};
use tui::{backend::Backend, Terminal};

use crate::{
  catalog::{detail_path, CatalogEntry, CatalogError, CatalogSource, Listing},
  config::Config,
  detail::{resolve_detail, DetailView},
  inquiry::{EmailError, EmailService, InquiryController, TemplateKind},
  pages::{FetchTicket, ProductsPage},
  routes::{Origin, Route}
};

mod render;
mod user_input;

pub use user_input::user_input;

/// Where the user is, plus whatever the previous screen handed over
/// (the product being asked about, for checkout)
#[derive(Debug, Clone)]
struct Location {
  route: Route,
  product: Option<CatalogEntry>
}

/// Per-screen state, thrown away when the screen is left
pub enum Screen {
  Home,
  Products(ProductsPage),
  Detail(DetailScreen),
  Checkout(FormScreen),
  About { certifications_open: bool },
  Contact(FormScreen)
}

pub struct DetailScreen {
  pub id: String,
  pub origin: Origin,
  /// `None` while loading
  pub view: Option<DetailView>,
  pub image_missing: bool,
  pub scroll: u16
}

pub struct FormScreen {
  pub product: Option<CatalogEntry>,
  pub controller: InquiryController,
  /// Last validation complaint
  pub notice: Option<String>,
  /// Submission whose answer this form is waiting for
  pub pending: Option<u64>
}

/// Results of background work, delivered back to the UI task
#[derive(Debug)]
pub enum Update {
  Listing { ticket: FetchTicket, result: Result<Listing, CatalogError> },
  Detail { id: String, origin: Origin, view: DetailView },
  Image { url: String, available: bool },
  Sent { submission: u64, outcome: Result<(), EmailError> }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow { Continue, Quit }

enum Wake {
  Key(Option<Key>),
  Update(Option<Update>)
}

pub struct App<B: Backend> {
  /// terminal abstraction
  terminal: Terminal<B>,

  config: Config,
  source: Arc<dyn CatalogSource>,
  email: Arc<dyn EmailService>,

  /// Current location and the ones before it, for going back
  location: Location,
  history: Vec<Location>,

  /// What's on screen right now
  screen: Screen,

  /// Counters that keep late results from landing on a newer screen
  pages_opened: u64,
  submissions: u64,

  updates_tx: UnboundedSender<Update>,
  updates_rx: UnboundedReceiver<Update>
}

impl<B: Backend> App<B> {
  /// Must be called inside the runtime, opening the first screen may spawn a request
  pub fn new(
    mut terminal: Terminal<B>,
    config: Config,
    source: Arc<dyn CatalogSource>,
    email: Arc<dyn EmailService>,
    start: Route
  ) -> io::Result<Self> {
    terminal.clear()?;
    terminal.hide_cursor()?;

    let (updates_tx, updates_rx) = unbounded_channel();
    let location = Location { route: start, product: None };

    let mut app = App {
      terminal,
      config,
      source,
      email,
      screen: Screen::Home,
      location: location.clone(),
      history: vec![],
      pages_opened: 0,
      submissions: 0,
      updates_tx,
      updates_rx
    };
    app.enter(location);

    Ok(app)
  }

  // draw based on state
  fn render(&mut self) -> io::Result<()> {
    let (screen, route, config) = (&self.screen, &self.location.route, &self.config);
    self.terminal.draw(|f| render::draw(f, screen, route, config))?;
    Ok(())
  }

  /// Handles key presses and finished background work, redrawing after each.
  /// Returns when the user quits or stdin closes.
  pub async fn listen<S: Stream<Item = Key> + Unpin>(&mut self, mut keys: S) -> anyhow::Result<()> {
    loop {
      self.render()?;

      let wake = {
        let update = Box::pin(self.updates_rx.recv());
        match select(keys.next(), update).await {
          Either::Left((key, _)) => Wake::Key(key),
          Either::Right((update, _)) => Wake::Update(update)
        }
      };

      match wake {
        Wake::Key(Some(key)) => if self.on_key(key) == Flow::Quit { break },
        Wake::Update(Some(update)) => self.apply(update),
        Wake::Key(None) | Wake::Update(None) => break
      }
    }

    Ok(())
  }

  fn navigate(&mut self, route: Route, product: Option<CatalogEntry>) {
    let previous = std::mem::replace(&mut self.location, Location { route, product });
    self.history.push(previous);
    self.enter(self.location.clone());
  }

  fn back(&mut self) {
    if let Some(previous) = self.history.pop() {
      self.location = previous.clone();
      self.enter(previous);
    }
  }

  /// Builds the screen for `location` and kicks off whatever it needs to load
  fn enter(&mut self, location: Location) {
    info!(route = %location.route, "open");

    self.screen = match location.route {
      Route::Home => Screen::Home,
      Route::Products => {
        self.pages_opened += 1;
        let (page, ticket) = ProductsPage::open(self.pages_opened);
        self.fetch_listing(ticket);
        Screen::Products(page)
      },
      Route::Detail { id, origin } => {
        self.resolve(id.clone(), origin);
        Screen::Detail(DetailScreen { id, origin, view: None, image_missing: false, scroll: 0 })
      },
      Route::Checkout => Screen::Checkout(FormScreen {
        product: location.product,
        controller: InquiryController::checkout(),
        notice: None,
        pending: None
      }),
      Route::About => Screen::About { certifications_open: false },
      Route::Contact => Screen::Contact(FormScreen {
        product: None,
        controller: InquiryController::contact(),
        notice: None,
        pending: None
      })
    };
  }

  fn fetch_listing(&self, ticket: FetchTicket) {
    let source = Arc::clone(&self.source);
    let tx = self.updates_tx.clone();

    tokio::spawn(async move {
      let result = source.listing(ticket.category).await;
      // the receiver lives as long as the app, a failed send means we're shutting down
      let _ = tx.send(Update::Listing { ticket, result });
    });
  }

  fn resolve(&self, id: String, origin: Origin) {
    let source = Arc::clone(&self.source);
    let images = self.config.images.clone();
    let tx = self.updates_tx.clone();

    tokio::spawn(async move {
      let view = resolve_detail(&id, origin, source.as_ref(), &images).await;
      let _ = tx.send(Update::Detail { id, origin, view });
    });
  }

  fn probe_image(&self, url: String) {
    let source = Arc::clone(&self.source);
    let tx = self.updates_tx.clone();

    tokio::spawn(async move {
      let available = source.image_available(&url).await;
      let _ = tx.send(Update::Image { url, available });
    });
  }

  /// Folds finished background work into the current screen. Results meant for a
  /// screen that has since been left are dropped.
  fn apply(&mut self, update: Update) {
    let mut probe = None;

    match (update, &mut self.screen) {
      (Update::Listing { ticket, result }, Screen::Products(page)) => page.apply(ticket, result),

      (Update::Detail { id, origin, view }, Screen::Detail(detail)) if detail.id == id && detail.origin == origin => {
        if let DetailView::Found { image, .. } = &view { probe = Some(image.clone()); }
        detail.view = Some(view);
      },

      (Update::Image { url, available }, Screen::Detail(detail)) => {
        if let Some(DetailView::Found { image, .. }) = &detail.view {
          if *image == url { detail.image_missing = !available; }
        }
      },

      (Update::Sent { submission, outcome }, Screen::Checkout(form) | Screen::Contact(form)) if form.pending == Some(submission) => {
        form.pending = None;
        form.controller.finish_submit(outcome);
      },

      (update, _) => debug!(?update, "dropping update for a screen that is gone")
    }

    if let Some(url) = probe { self.probe_image(url); }
  }

  fn submit(&mut self) {
    let sales_inbox = self.config.email.sales_inbox.clone();
    let email = Arc::clone(&self.email);
    let tx = self.updates_tx.clone();

    let form = match &mut self.screen {
      Screen::Checkout(form) | Screen::Contact(form) => form,
      _ => return
    };
    if form.controller.is_submitting() { return; }

    match form.controller.begin_submit(form.product.as_ref(), &sales_inbox) {
      Ok(request) => {
        self.submissions += 1;
        let submission = self.submissions;
        form.notice = None;
        form.pending = Some(submission);

        tokio::spawn(async move {
          let outcome = email.send(&request).await;
          let _ = tx.send(Update::Sent { submission, outcome });
        });
      },
      Err(e) => form.notice = Some(e.to_string())
    }
  }

  fn on_key(&mut self, key: Key) -> Flow {
    match key {
      Key::Ctrl('c') | Key::Ctrl('d') => return Flow::Quit,
      Key::F(1) => { self.navigate(Route::Home, None); return Flow::Continue },
      Key::F(2) => { self.navigate(Route::Products, None); return Flow::Continue },
      Key::F(3) => { self.navigate(Route::About, None); return Flow::Continue },
      Key::F(4) => { self.navigate(Route::Contact, None); return Flow::Continue },
      // "Get Started"
      Key::F(5) => { self.navigate(Route::Contact, None); return Flow::Continue },
      _ => ()
    }

    match self.screen {
      Screen::Home => self.on_home_key(key),
      Screen::Products(_) => self.on_products_key(key),
      Screen::Detail(_) => self.on_detail_key(key),
      Screen::About { .. } => self.on_about_key(key),
      Screen::Checkout(_) | Screen::Contact(_) => self.on_form_key(key)
    }
  }

  fn on_home_key(&mut self, key: Key) -> Flow {
    match key {
      Key::Char('q') => return Flow::Quit,
      Key::Char('p') | Key::Char('\n') => self.navigate(Route::Products, None),
      Key::Char('a') => self.navigate(Route::About, None),
      Key::Char('c') => self.navigate(Route::Contact, None),
      Key::Esc | Key::Backspace => self.back(),
      _ => ()
    }
    Flow::Continue
  }

  fn on_products_key(&mut self, key: Key) -> Flow {
    let page = match &mut self.screen {
      Screen::Products(page) => page,
      _ => return Flow::Continue
    };

    let mut ticket = None;
    let mut open = None;

    match key {
      Key::Left => ticket = page.select_tab(page.tab().previous()),
      Key::Right => ticket = page.select_tab(page.tab().next()),
      Key::Up => page.move_selection(-1),
      Key::Down => page.move_selection(1),
      Key::PageUp => page.move_selection(-10),
      Key::PageDown => page.move_selection(10),
      Key::Ctrl('u') => page.clear_filters(),
      Key::Char('\t') => page.cycle_category(),
      Key::Char('\n') => open = page.selected_entry().cloned(),
      Key::Backspace => page.pop_search(),
      Key::Char(c) => page.push_search(c),
      Key::Esc => self.back(),
      _ => ()
    }

    if let Some(ticket) = ticket { self.fetch_listing(ticket); }
    if let Some(entry) = open {
      let route = Route::Detail { id: detail_id(&entry), origin: Origin::from(entry.category()) };
      self.navigate(route, Some(entry));
    }

    Flow::Continue
  }

  fn on_detail_key(&mut self, key: Key) -> Flow {
    let detail = match &mut self.screen {
      Screen::Detail(detail) => detail,
      _ => return Flow::Continue
    };

    match key {
      Key::Char('q') => return Flow::Quit,
      Key::Up => detail.scroll = detail.scroll.saturating_sub(1),
      Key::Down => detail.scroll = detail.scroll.saturating_add(1),
      Key::Char('b') => self.navigate(Route::Products, None),
      Key::Char('\n') | Key::Char('r') => match &detail.view {
        // "Request Information"
        Some(DetailView::Found { entry, .. }) => {
          let entry = entry.clone();
          self.navigate(Route::Checkout, Some(entry));
        },
        Some(DetailView::NotFound) => self.navigate(Route::Products, None),
        None => ()
      },
      Key::Esc | Key::Backspace => self.back(),
      _ => ()
    }

    Flow::Continue
  }

  fn on_about_key(&mut self, key: Key) -> Flow {
    let open = match &mut self.screen {
      Screen::About { certifications_open } => certifications_open,
      _ => return Flow::Continue
    };

    match key {
      Key::Char('q') => return Flow::Quit,
      Key::Char('c') => *open = !*open,
      Key::Esc if *open => *open = false,
      Key::Esc | Key::Backspace => self.back(),
      _ => ()
    }

    Flow::Continue
  }

  fn on_form_key(&mut self, key: Key) -> Flow {
    let form = match &mut self.screen {
      Screen::Checkout(form) | Screen::Contact(form) => form,
      _ => return Flow::Continue
    };

    // checkout opened without a product only offers a way to the catalog
    if form.controller.kind() == TemplateKind::Checkout && form.product.is_none() {
      match key {
        Key::Char('\n') => self.navigate(Route::Products, None),
        Key::Esc | Key::Backspace => self.back(),
        _ => ()
      }
      return Flow::Continue;
    }

    match key {
      Key::Char('\t') | Key::Down => form.controller.focus_next(),
      Key::BackTab | Key::Up => form.controller.focus_previous(),
      Key::Char('\n') => self.submit(),
      Key::Backspace => form.controller.backspace(),
      Key::Char(c) => form.controller.type_char(c),
      Key::Esc => self.back(),
      _ => ()
    }

    Flow::Continue
  }
}

/// Route id for an entry picked from the listing, i.e. its detail path minus `/products/` and origin
fn detail_id(entry: &CatalogEntry) -> String {
  match detail_path(entry).parse::<Route>() {
    Ok(Route::Detail { id, .. }) => id,
    _ => entry.display_name()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::{Category, InstrumentRecord, MockCatalogSource, PartRecord, FALLBACK_IMAGE};
  use crate::inquiry::{Banner, MockEmailService};
  use pretty_assertions::assert_eq;
  use tui::backend::TestBackend;

  fn app(source: MockCatalogSource, email: MockEmailService, start: &str) -> App<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(140, 60)).unwrap();
    App::new(terminal, Config::baked(), Arc::new(source), Arc::new(email), start.parse().unwrap()).unwrap()
  }

  fn screen_text(app: &mut App<TestBackend>) -> String {
    app.render().unwrap();
    let buffer = app.terminal.backend().buffer();
    buffer.content
      .chunks(buffer.area.width as usize)
      .map(|row| row.iter().map(|cell| cell.symbol.as_str()).collect::<String>())
      .collect::<Vec<String>>()
      .join("\n")
  }

  // waits for the next piece of background work and applies it
  async fn settle(app: &mut App<TestBackend>) {
    let update = app.updates_rx.recv().await.unwrap();
    app.apply(update);
  }

  fn press(app: &mut App<TestBackend>, keys: &str) {
    keys.chars().for_each(|c| { app.on_key(Key::Char(c)); });
  }

  fn empty_listings(source: &mut MockCatalogSource) {
    source.expect_listing().returning(|category| Ok(Listing::empty(category)));
  }

  #[tokio::test]
  async fn unknown_machine_shows_not_found_and_links_back() {
    let mut source = MockCatalogSource::new();
    source.expect_machine_detail().withf(|slug| slug == "ghost").times(1).returning(|_| Ok(None));
    empty_listings(&mut source);

    let mut app = app(source, MockEmailService::new(), "/products/ghost.jpg");
    assert!(screen_text(&mut app).contains("Loading..."));

    settle(&mut app).await;
    let text = screen_text(&mut app);
    assert!(text.contains("Product Not Found"));
    assert!(text.contains("Back to Products (/products)"));

    app.on_key(Key::Char('\n'));
    assert_eq!(&app.location.route, &Route::Products);

    settle(&mut app).await;
    assert!(screen_text(&mut app).contains("No machines found matching your criteria"));
  }

  #[tokio::test]
  async fn switching_tabs_clears_search_and_loads_the_new_list() {
    let mut source = MockCatalogSource::new();
    source.expect_listing().times(2).returning(|category| Ok(match category {
      Category::Instruments => Listing::instruments(vec![InstrumentRecord {
        name: Some("Kelly Forceps".into()),
        url: "kelly.png".into(),
        size: Some(2048),
        last_modified: None
      }]),
      other => Listing::empty(other)
    }));

    let mut app = app(source, MockEmailService::new(), "/products");
    settle(&mut app).await;

    press(&mut app, "zzz");
    app.on_key(Key::Right);

    match &app.screen {
      Screen::Products(page) => {
        assert_eq!(page.tab(), Category::Instruments);
        assert_eq!(page.search(), "");
        assert!(page.is_loading());
      },
      _ => panic!("expected the products screen")
    }

    settle(&mut app).await;
    let text = screen_text(&mut app);
    assert!(text.contains("Kelly Forceps"));
    assert!(text.contains("Size: 2.00 KB"));
  }

  #[tokio::test]
  async fn part_inquiry_from_detail_to_sent() {
    let mut source = MockCatalogSource::new();
    source.expect_image_available().times(1).returning(|_| false);

    let mut email = MockEmailService::new();
    email
      .expect_send()
      .withf(|request| request.template == TemplateKind::Checkout && request.params["product_name"] == "Part Flow Sensor")
      .times(1)
      .returning(|_| Ok(()));

    let mut app = app(source, email, "/products/Flow%20Sensor/part");
    settle(&mut app).await;
    settle(&mut app).await;

    let text = screen_text(&mut app);
    assert!(text.contains("Flow Sensor"));
    assert!(text.contains(FALLBACK_IMAGE));

    app.on_key(Key::Char('r'));
    assert_eq!(&app.location.route, &Route::Checkout);
    assert!(screen_text(&mut app).contains("Product Summary"));

    for value in ["Imran", "Qureshi", "imran@citycare.pk", "+92 21 555 0100", "", "12 Shahrah-e-Faisal", "Karachi", "Pakistan", "Two units"] {
      press(&mut app, value);
      app.on_key(Key::Char('\t'));
    }
    app.on_key(Key::Char('\n'));
    assert!(screen_text(&mut app).contains("Sending..."));

    settle(&mut app).await;
    match &app.screen {
      Screen::Checkout(form) => {
        assert!(form.controller.form().is_empty());
        assert_eq!(
          form.controller.banner(),
          Some(&Banner::Success("Your inquiry has been sent successfully! We will contact you soon."))
        );
      },
      _ => panic!("expected the checkout screen")
    }
  }

  #[tokio::test]
  async fn checkout_without_a_product_points_at_the_catalog() {
    let mut source = MockCatalogSource::new();
    empty_listings(&mut source);

    let mut app = app(source, MockEmailService::new(), "/checkout");
    assert!(screen_text(&mut app).contains("No product selected"));

    // typing goes nowhere
    press(&mut app, "abc");
    assert_eq!(&app.location.route, &Route::Checkout);

    app.on_key(Key::Char('\n'));
    assert_eq!(&app.location.route, &Route::Products);
  }

  #[tokio::test]
  async fn invalid_contact_form_is_not_sent() {
    let mut app = app(MockCatalogSource::new(), MockEmailService::new(), "/contact");
    press(&mut app, "Sana");
    app.on_key(Key::Char('\t'));
    press(&mut app, "not-an-email");
    app.on_key(Key::Char('\n'));

    match &app.screen {
      Screen::Contact(form) => {
        assert_eq!(form.notice.as_deref(), Some("Email Address must be an email address"));
        assert_eq!(form.controller.focus(), 1);
        assert!(!form.controller.is_submitting());
      },
      _ => panic!("expected the contact screen")
    }
    assert!(screen_text(&mut app).contains("Email Address must be an email address"));
  }

  #[tokio::test]
  async fn certifications_modal_closes_before_going_back() {
    let mut app = app(MockCatalogSource::new(), MockEmailService::new(), "/");
    app.on_key(Key::F(3));
    app.on_key(Key::Char('c'));
    assert!(screen_text(&mut app).contains("DOTmed 100 Ethics Certifications"));

    app.on_key(Key::Esc);
    assert_eq!(&app.location.route, &Route::About);
    assert!(!screen_text(&mut app).contains("DOTmed 100 Ethics Certifications"));

    app.on_key(Key::Esc);
    assert_eq!(&app.location.route, &Route::Home);
  }

  #[tokio::test]
  async fn back_walks_the_history() {
    let mut app = app(MockCatalogSource::new(), MockEmailService::new(), "/");
    app.on_key(Key::F(3));
    app.on_key(Key::F(4));
    assert_eq!(&app.location.route, &Route::Contact);

    app.on_key(Key::Esc);
    assert_eq!(&app.location.route, &Route::About);
    app.on_key(Key::Backspace);
    assert_eq!(&app.location.route, &Route::Home);

    // nothing left, stays put
    app.on_key(Key::Esc);
    assert_eq!(&app.location.route, &Route::Home);
    assert_eq!(app.on_key(Key::Ctrl('c')), Flow::Quit);
  }

  fn by_category(category: Category) -> Listing {
    match category {
      Category::Machines => Listing::empty(category),
      Category::Instruments => Listing::instruments(vec![InstrumentRecord {
        name: Some("Kelly Forceps".into()),
        url: "kelly.png".into(),
        size: None,
        last_modified: None
      }]),
      Category::Parts => Listing::parts(vec![PartRecord { name: Some("Flow Sensor".into()), url: "fs.png".into() }])
    }
  }

  #[tokio::test]
  async fn listing_from_a_previous_visit_is_ignored() {
    let mut source = MockCatalogSource::new();
    source.expect_listing().times(4).returning(|category| Ok(by_category(category)));

    let mut app = app(source, MockEmailService::new(), "/products");
    settle(&mut app).await;

    // parts requested, then the screen is left and reopened before the answer lands
    app.on_key(Key::Left);
    app.on_key(Key::F(1));
    app.on_key(Key::F(2));
    app.on_key(Key::Right);

    app.apply(Update::Listing {
      ticket: FetchTicket { page: 1, request: 2, category: Category::Parts },
      result: Ok(by_category(Category::Parts))
    });
    match &app.screen {
      Screen::Products(page) => {
        assert_eq!(page.tab(), Category::Instruments);
        assert!(page.is_loading());
        assert!(page.listing().is_empty());
      },
      _ => panic!("expected the products screen")
    }

    // the real answers: old parts, new machines, new instruments
    for _ in 0..3 {
      settle(&mut app).await;
    }
    match &app.screen {
      Screen::Products(page) => {
        assert!(!page.is_loading());
        assert_eq!(page.listing().category(), Category::Instruments);
        assert_eq!(page.visible().iter().map(|e| e.display_name()).collect::<Vec<_>>(), vec!["Kelly Forceps".to_string()]);
      },
      _ => panic!("expected the products screen")
    }
  }

  #[tokio::test]
  async fn answer_for_an_abandoned_form_does_not_finish_the_new_one() {
    let mut email = MockEmailService::new();
    email.expect_send().times(2).returning(|_| Ok(()));

    let fill = |app: &mut App<TestBackend>| {
      for value in ["Sana", "sana@example.org", "", "Quote", "Hello"] {
        press(app, value);
        app.on_key(Key::Char('\t'));
      }
      app.on_key(Key::Char('\n'));
    };

    let mut app = app(MockCatalogSource::new(), email, "/contact");
    fill(&mut app);
    app.on_key(Key::F(1));
    app.on_key(Key::F(4));
    fill(&mut app);

    app.apply(Update::Sent { submission: 1, outcome: Ok(()) });
    match &app.screen {
      Screen::Contact(form) => {
        assert_eq!(form.pending, Some(2));
        assert!(form.controller.is_submitting());
        assert_eq!(form.controller.banner(), None);
      },
      _ => panic!("expected the contact screen")
    }

    settle(&mut app).await;
    settle(&mut app).await;
    match &app.screen {
      Screen::Contact(form) => {
        assert_eq!(form.pending, None);
        assert_eq!(
          form.controller.banner(),
          Some(&Banner::Success("Your message has been sent successfully! We will get back to you soon."))
        );
      },
      _ => panic!("expected the contact screen")
    }
  }
}
