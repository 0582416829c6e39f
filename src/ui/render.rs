use chrono::Datelike;
use tui::{
  backend::Backend,
  layout::{Alignment, Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  terminal::Frame,
  text::{Span, Spans},
  widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap}
};

use crate::{
  catalog::{humanize_key, CatalogEntry, Card, Category, SpecValue, FALLBACK_IMAGE},
  config::Config,
  detail::DetailView,
  inquiry::{Banner, InquiryController, TemplateKind},
  pages::{content, ProductsPage},
  routes::Route
};
use super::{DetailScreen, FormScreen, Screen};

const NAV: [(&str, &str); 4] = [("Home", "F1"), ("Products", "F2"), ("About", "F3"), ("Contact", "F4")];

fn bold() -> Style { Style::default().add_modifier(Modifier::BOLD) }
fn accent() -> Style { Style::default().fg(Color::Cyan) }
fn dim() -> Style { Style::default().fg(Color::DarkGray) }

fn boxed(title: &str) -> Block {
  Block::default()
    .borders(Borders::ALL)
    .border_type(BorderType::Rounded)
    .title(Span::styled(format!(" {} ", title), bold()))
}

fn text(s: impl Into<String>) -> Spans<'static> { Spans::from(Span::raw(s.into())) }
fn styled(s: impl Into<String>, style: Style) -> Spans<'static> { Spans::from(Span::styled(s.into(), style)) }
fn blank() -> Spans<'static> { Spans::from("") }

/// Navbar, screen body, footer
pub fn draw<B: Backend>(f: &mut Frame<B>, screen: &Screen, route: &Route, config: &Config) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(2)].as_ref())
    .split(f.size());

  draw_navbar(f, rows[0], route);

  match screen {
    Screen::Home => draw_home(f, rows[1]),
    Screen::Products(page) => draw_products(f, rows[1], page, config),
    Screen::Detail(detail) => draw_detail(f, rows[1], detail),
    Screen::Checkout(form) => draw_checkout(f, rows[1], form),
    Screen::About { certifications_open } => draw_about(f, rows[1], *certifications_open),
    Screen::Contact(form) => draw_contact(f, rows[1], form, &config.email.sales_inbox)
  }

  draw_footer(f, rows[2]);
}

fn draw_navbar<B: Backend>(f: &mut Frame<B>, area: Rect, route: &Route) {
  let titles: Vec<Spans> = NAV
    .iter()
    .map(|(title, key)| Spans::from(vec![Span::raw(*title), Span::styled(format!(" {}", key), dim())]))
    .chain(std::iter::once(Spans::from(Span::styled("Get Started F5", Style::default().fg(Color::Black).bg(Color::Cyan)))))
    .collect();

  // checkout lives under the products section
  let current = match route.title() {
    "Home" => 0,
    "Products" | "Checkout" => 1,
    "About" => 2,
    _ => 3
  };

  let tabs = Tabs::new(titles)
    .block(boxed(content::BRAND))
    .select(current)
    .highlight_style(accent().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));

  f.render_widget(tabs, area);
}

/// Offices on one line, quick links and copyright on the next
fn draw_footer<B: Backend>(f: &mut Frame<B>, area: Rect) {
  let offices: Vec<String> = content::OFFICES
    .iter()
    .map(|(office, address)| format!("{}: {}", office, address.join(" ")))
    .collect();

  let links: Vec<String> = NAV.iter().map(|(title, key)| format!("{} {}", title, key)).collect();
  let year = chrono::Local::now().year();

  let footer = Paragraph::new(vec![
    styled(offices.join("   "), dim()),
    Spans::from(vec![
      Span::styled(content::copyright(year), dim()),
      Span::styled(format!("   {}   Ctrl-C quit  Esc back", links.join(" · ")), dim())
    ])
  ]);
  f.render_widget(footer, area);
}

fn draw_home<B: Backend>(f: &mut Frame<B>, area: Rect) {
  let mut lines = vec![
    blank(),
    styled(content::HERO_TITLE, bold().fg(Color::Cyan)),
    text(content::HERO_TEXT),
    blank(),
    Spans::from(vec![
      Span::styled("[p] Browse Products", accent()),
      Span::raw("   "),
      Span::styled("[c] Contact Us", accent())
    ]),
    blank(),
    styled(content::FEATURES_TITLE, bold())
  ];

  for feature in content::FEATURES.iter() {
    lines.push(Spans::from(vec![Span::styled(format!(" • {}: ", feature.title), bold()), Span::raw(feature.text)]));
  }

  lines.extend(vec![
    blank(),
    styled(content::CALL_TO_ACTION_TITLE, bold()),
    text(content::CALL_TO_ACTION_TEXT),
    styled("[c] Contact Us Now", accent())
  ]);

  let body = Paragraph::new(lines).block(boxed("Home")).wrap(Wrap { trim: false });
  f.render_widget(body, area);
}

fn draw_products<B: Backend>(f: &mut Frame<B>, area: Rect, page: &ProductsPage, config: &Config) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)].as_ref())
    .split(area);

  let tabs = Tabs::new(Category::ALL.iter().map(|c| Spans::from(c.label())).collect())
    .block(boxed("Browse  ←/→"))
    .select(page.tab().index())
    .highlight_style(accent().add_modifier(Modifier::BOLD));
  f.render_widget(tabs, rows[0]);

  let filters = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
    .split(rows[1]);

  let search = if page.search().is_empty() {
    Span::styled(format!("Search {}...", page.tab().noun()), dim())
  } else {
    Span::raw(format!("{}█", page.search()))
  };
  f.render_widget(Paragraph::new(Spans::from(search)).block(boxed("Search")), filters[0]);

  let category = if page.category_filter().is_empty() { "All" } else { page.category_filter() };
  f.render_widget(Paragraph::new(category).block(boxed("Category  Tab")), filters[1]);

  if page.is_loading() {
    let loading = Paragraph::new(format!("Loading {}...", page.tab().noun()))
      .alignment(Alignment::Center)
      .block(boxed(page.tab().label()));
    f.render_widget(loading, rows[2]);
    return;
  }

  let visible = page.visible();
  if visible.is_empty() {
    let empty = Paragraph::new(vec![
      blank(),
      text(format!("No {} found matching your criteria", page.tab().noun())),
      styled("Ctrl-U Clear Filters", accent())
    ])
      .alignment(Alignment::Center)
      .block(boxed(page.tab().label()));
    f.render_widget(empty, rows[2]);
    return;
  }

  let items: Vec<ListItem> = visible
    .iter()
    .map(|entry| {
      let card = Card::new(entry, &config.images);
      let mut lines = vec![Spans::from(vec![
        Span::styled(card.title, bold()),
        Span::styled(format!("  [{}]", card.badge), accent())
      ])];
      lines.extend(card.lines.into_iter().map(|l| text(format!("  {}", l))));
      lines.push(styled(format!("  {}", card.link), dim()));
      ListItem::new(lines)
    })
    .collect();

  let title = format!("{} ({})  ↑/↓ Enter", page.tab().label(), visible.len());
  let list = List::new(items)
    .block(boxed(&title))
    .highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol("▶ ");

  let mut state = ListState::default();
  state.select(Some(page.selected()));
  f.render_stateful_widget(list, rows[2], &mut state);
}

fn draw_detail<B: Backend>(f: &mut Frame<B>, area: Rect, detail: &DetailScreen) {
  let (entry, image) = match &detail.view {
    None => {
      f.render_widget(Paragraph::new("Loading...").alignment(Alignment::Center).block(boxed("Products")), area);
      return;
    },
    Some(DetailView::NotFound) => {
      let missing = Paragraph::new(vec![
        blank(),
        styled("Product Not Found", bold()),
        text("The product you're looking for doesn't exist or has been removed."),
        blank(),
        styled("← Back to Products (/products)  Enter", accent())
      ])
        .alignment(Alignment::Center)
        .block(boxed("Products"));
      f.render_widget(missing, area);
      return;
    },
    Some(DetailView::Found { entry, image }) => (entry, image)
  };

  let image = if detail.image_missing { FALLBACK_IMAGE } else { image.as_str() };

  let mut lines = vec![
    styled("← Back to Products  b", accent()),
    blank(),
    styled(format!("[{}]", badge(entry)), accent()),
    styled(entry.display_name(), bold().fg(Color::Cyan)),
    text(format!("Image: {}", image)),
    blank()
  ];

  match entry {
    CatalogEntry::Machine(m) => {
      if !m.metadata.description.is_empty() {
        lines.push(text(m.metadata.description.clone()));
        lines.push(blank());
      }

      for (key, value) in m.highlights() {
        lines.push(Spans::from(vec![Span::styled(format!("{}: ", key), bold()), Span::raw(value.to_string())]));
      }

      if !m.metadata.features.is_empty() {
        lines.push(blank());
        lines.push(styled("Key Features", bold()));
        lines.extend(m.metadata.features.iter().map(|feature| text(format!(" • {}", feature))));
      }

      if !m.metadata.specifications.is_empty() {
        lines.push(blank());
        lines.push(styled("Technical Specifications", bold()));
        spec_tree(&m.metadata.specifications, "", &mut lines);
      }
    },
    CatalogEntry::Instrument(i) => {
      lines.push(styled("Instrument Details", bold()));
      if let Some(date) = i.last_modified_date() { lines.push(text(format!(" ├── Last Modified: {}", date))); }
      if let Some(size) = i.size_kb() { lines.push(text(format!(" ├── Size: {}", size))); }
      lines.push(text(format!(" └── Source: {}", i.url)));
    },
    CatalogEntry::Part(p) => {
      lines.push(styled("Part Details", bold()));
      lines.push(text(format!(" └── Source: {}", p.url)));
    }
  }

  lines.push(blank());
  lines.push(styled("[Enter] Request Information", Style::default().fg(Color::Black).bg(Color::Cyan)));
  lines.push(blank());
  lines.push(styled("Additional Information", bold()));
  for (title, body) in content::ADDITIONAL_INFO.iter() {
    lines.push(Spans::from(vec![Span::styled(format!("{}: ", title), bold()), Span::raw(*body)]));
  }

  let body = Paragraph::new(lines)
    .block(boxed("Products  ↑/↓ scroll"))
    .wrap(Wrap { trim: false })
    .scroll((detail.scroll, 0));
  f.render_widget(body, area);
}

fn badge(entry: &CatalogEntry) -> &'static str {
  match entry {
    CatalogEntry::Machine(_) => "Machine",
    CatalogEntry::Instrument(_) => "Instrument",
    CatalogEntry::Part(_) => "Part"
  }
}

/// Specifications as a tree, nested maps indent under their key
fn spec_tree(specs: &indexmap::IndexMap<String, SpecValue>, prefix: &str, out: &mut Vec<Spans<'static>>) {
  let count = specs.len();
  for (n, (key, value)) in specs.iter().enumerate() {
    let last = n + 1 == count;
    let branch = if last { "└── " } else { "├── " };
    let key = humanize_key(key);

    match value {
      SpecValue::Map(children) => {
        out.push(text(format!(" {}{}{}", prefix, branch, key)));
        let nested = format!("{}{}", prefix, if last { "    " } else { "│   " });
        spec_tree(children, &nested, out);
      },
      value => out.push(text(format!(" {}{}{}: {}", prefix, branch, key, value)))
    }
  }
}

fn draw_checkout<B: Backend>(f: &mut Frame<B>, area: Rect, form: &FormScreen) {
  let entry = match &form.product {
    Some(entry) => entry,
    None => {
      let empty = Paragraph::new(vec![
        blank(),
        styled("No product selected", bold()),
        blank(),
        styled("Browse Products (/products)  Enter", accent())
      ])
        .alignment(Alignment::Center)
        .block(boxed("Checkout"));
      f.render_widget(empty, area);
      return;
    }
  };

  let columns = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)].as_ref())
    .split(area);

  let mut summary = vec![styled(entry.display_name(), bold().fg(Color::Cyan)), blank()];
  if let CatalogEntry::Machine(m) = entry {
    if !m.metadata.description.is_empty() {
      summary.push(text(m.metadata.description.clone()));
      summary.push(blank());
    }
    if !m.metadata.features.is_empty() {
      summary.push(styled("Key Features", bold()));
      summary.extend(m.metadata.features.iter().map(|feature| text(format!(" • {}", feature))));
      summary.push(blank());
    }
    if !m.metadata.specifications.is_empty() {
      summary.push(styled("Specifications", bold()));
      spec_tree(&m.metadata.specifications, "", &mut summary);
    }
  }

  f.render_widget(Paragraph::new(summary).block(boxed("Product Summary")).wrap(Wrap { trim: false }), columns[0]);
  draw_form(f, columns[1], form, "Contact Information");
}

fn draw_contact<B: Backend>(f: &mut Frame<B>, area: Rect, form: &FormScreen, inbox: &str) {
  let columns = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)].as_ref())
    .split(area);

  let mut info = vec![text(content::CONTACT_TAGLINE), blank()];
  for (office, address) in content::OFFICES.iter() {
    info.push(styled(*office, bold()));
    info.extend(address.iter().map(|line| text(format!("  {}", line))));
    info.push(blank());
  }
  info.push(Spans::from(vec![Span::styled("Email: ", bold()), Span::raw(inbox.to_string())]));
  info.push(Spans::from(vec![Span::styled("WhatsApp: ", bold()), Span::raw(content::WHATSAPP)]));

  f.render_widget(Paragraph::new(info).block(boxed("Contact Us")).wrap(Wrap { trim: false }), columns[0]);
  draw_form(f, columns[1], form, "Send Us a Message");
}

fn draw_form<B: Backend>(f: &mut Frame<B>, area: Rect, form: &FormScreen, title: &str) {
  let controller: &InquiryController = &form.controller;
  let mut lines = vec![];

  match controller.banner() {
    Some(Banner::Success(message)) => lines.push(styled(*message, Style::default().fg(Color::Green))),
    Some(Banner::Error(message)) => lines.push(styled(message.clone(), Style::default().fg(Color::Red))),
    None => ()
  }
  if let Some(notice) = &form.notice {
    lines.push(styled(notice.clone(), Style::default().fg(Color::Yellow)));
  }
  if !lines.is_empty() { lines.push(blank()); }

  for (n, spec) in controller.form().specs().iter().enumerate() {
    let focused = n == controller.focus();
    let label = if spec.required { format!("{} *", spec.label) } else { spec.label.to_string() };
    lines.push(styled(label, if focused { accent().add_modifier(Modifier::BOLD) } else { bold() }));

    let value = controller.form().value(n);
    let marker = if focused { "▸ " } else { "  " };
    let cursor = if focused && !controller.is_submitting() { "█" } else { "" };
    lines.push(text(format!("{}{}{}", marker, value, cursor)));
  }

  lines.push(blank());
  let action = match (controller.is_submitting(), controller.kind()) {
    (true, _) => "Sending...",
    (false, TemplateKind::Checkout) => "[Enter] Send Inquiry",
    (false, TemplateKind::Contact) => "[Enter] Send Message"
  };
  lines.push(styled(action, Style::default().fg(Color::Black).bg(Color::Cyan)));
  lines.push(styled("Tab/↓ next field  Shift-Tab/↑ previous", dim()));

  f.render_widget(Paragraph::new(lines).block(boxed(title)).wrap(Wrap { trim: false }), area);
}

fn draw_about<B: Backend>(f: &mut Frame<B>, area: Rect, certifications_open: bool) {
  let mut lines = vec![
    styled(content::ABOUT_TITLE, bold().fg(Color::Cyan)),
    text(content::ABOUT_TAGLINE),
    blank(),
    styled("Our Mission", bold()),
    text(content::MISSION),
    blank(),
    styled("Our Vision", bold()),
    text(content::VISION),
    blank(),
    styled("Our Journey", bold())
  ];

  for milestone in content::TIMELINE.iter() {
    lines.push(Spans::from(vec![
      Span::styled(format!(" {}  ", milestone.year), accent()),
      Span::styled(format!("{}: ", milestone.title), bold()),
      Span::raw(milestone.text)
    ]));
  }

  lines.push(blank());
  lines.push(styled("Leadership Team", bold()));
  for member in content::TEAM.iter() {
    lines.push(Spans::from(vec![
      Span::styled(format!(" {}", member.name), bold()),
      Span::styled(format!(", {}", member.role), accent()),
      Span::raw(format!(". {}", member.bio))
    ]));
  }

  lines.push(blank());
  lines.push(styled(content::ASSOCIATIONS_TITLE, bold()));
  for association in content::ASSOCIATIONS.iter() {
    lines.push(Spans::from(vec![
      Span::styled(format!(" {}", association.name), bold()),
      Span::styled(format!(" ({})", association.partnership), accent()),
      Span::raw(format!(" {}", association.text))
    ]));
  }

  lines.push(blank());
  lines.push(styled("[c] View Certifications", accent()));

  f.render_widget(Paragraph::new(lines).block(boxed("About")).wrap(Wrap { trim: false }), area);

  if certifications_open {
    draw_certifications(f, area);
  }
}

fn draw_certifications<B: Backend>(f: &mut Frame<B>, area: Rect) {
  let modal = centered(area, 70, 60);

  let mut lines = vec![styled("DOTmed 100 Ethics Certifications", bold()), blank()];
  for certification in content::CERTIFICATIONS.iter() {
    lines.push(Spans::from(vec![
      Span::styled(format!(" {}  ", certification.year), accent()),
      Span::raw(certification.image)
    ]));
  }
  lines.extend(vec![
    blank(),
    text(format!("Verify: {}", content::DOTMED_VERIFY_URL)),
    text(format!("Store: {}", content::DOTMED_STORE_URL)),
    blank(),
    styled("Esc / c close", dim())
  ]);

  f.render_widget(Clear, modal);
  f.render_widget(Paragraph::new(lines).block(boxed("Certifications")).wrap(Wrap { trim: false }), modal);
}

/// A rect `pct_x`% by `pct_y`% of `area`, centered in it
fn centered(area: Rect, pct_x: u16, pct_y: u16) -> Rect {
  let width = area.width * pct_x / 100;
  let height = area.height * pct_y / 100;
  Rect::new(area.x + (area.width - width) / 2, area.y + (area.height - height) / 2, width, height)
}
