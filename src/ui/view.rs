use crate::catalog::{Product, format_price};
use crate::routing::Route;
use crate::runtime::state::{DetailView, StorefrontState};
use crate::terminal::{CursorPos, TerminalSize};
use crate::ui::span::{Span, SpanLine, line_width};
use crate::ui::theme::Theme;

const SEARCH_LABEL: &str = "Search: ";
const SEARCH_PLACEHOLDER: &str = "Search products...";

const NAV: [(Route, &str); 5] = [
    (Route::Home, "Home"),
    (Route::Listing, "Products"),
    (Route::About, "About"),
    (Route::Contact, "Contact"),
    (Route::Cart, "Cart"),
];

/// One screen worth of lines. The first `header_rows` lines stay pinned;
/// the rest scroll by `scroll`.
#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
    pub header_rows: usize,
    pub scroll: usize,
}

#[derive(Debug, Default, Clone)]
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn render(&self, state: &StorefrontState, size: TerminalSize) -> RenderFrame {
        let mut frame = RenderFrame {
            scroll: state.scroll_offset(),
            ..RenderFrame::default()
        };

        self.nav_bar(state, &mut frame);
        frame.header_rows = frame.lines.len();

        match state.route() {
            Route::Home => self.home(&mut frame.lines),
            Route::Listing => self.listing(state, &mut frame.lines),
            Route::Detail(_) => self.detail(state.detail(), &mut frame.lines),
            Route::About => self.static_page(
                "About us",
                &[
                    "A small shop that sells phones, accessories and gadgets.",
                    "Everything in the catalog ships from our own warehouse.",
                ],
                &mut frame.lines,
            ),
            Route::Contact => self.static_page(
                "Contact",
                &["Write to hola@vitrina.example or call us on weekdays."],
                &mut frame.lines,
            ),
            Route::Cart => self.static_page("Cart", &["Your cart is empty."], &mut frame.lines),
            Route::Other(path) => {
                frame.lines.push(vec![Span::styled(
                    format!("Page not found: {path}"),
                    self.theme.error,
                )]);
            }
        }

        frame.lines.push(Vec::new());
        frame.lines.push(vec![Span::styled(
            "type to search  ←/→ page  ↑/↓ select  enter open  alt+←/→ history  ctrl+r reload  ctrl+c quit",
            self.theme.muted,
        )]);

        let max_col = size.width.saturating_sub(1);
        if let Some(cursor) = &mut frame.cursor {
            cursor.col = cursor.col.min(max_col);
        }
        frame
    }

    fn nav_bar(&self, state: &StorefrontState, frame: &mut RenderFrame) {
        let mut nav: SpanLine = vec![Span::styled("Vitrina", self.theme.brand), Span::new("  ")];
        for (route, label) in NAV {
            let active = match (&route, state.route()) {
                (Route::Listing, Route::Detail(_)) => true,
                (left, right) => left == right,
            };
            let style = if active {
                self.theme.nav_active
            } else {
                self.theme.nav
            };
            nav.push(Span::styled(label, style));
            nav.push(Span::new("  "));
        }
        nav.push(Span::styled(
            format!("[{}]", state.search().state()),
            self.theme.muted,
        ));
        frame.lines.push(nav);

        let input = state.search().input();
        let mut search: SpanLine = vec![Span::styled(SEARCH_LABEL, self.theme.title)];
        let col = line_width(&search) + Span::new(input).width();
        if input.is_empty() {
            search.push(Span::styled(SEARCH_PLACEHOLDER, self.theme.placeholder));
        } else {
            search.push(Span::styled(input, self.theme.search));
        }
        frame.cursor = Some(CursorPos {
            col: u16::try_from(col).unwrap_or(u16::MAX),
            row: frame.lines.len() as u16,
        });
        frame.lines.push(search);

        if let Some(notice) = state.notice() {
            frame
                .lines
                .push(vec![Span::styled(notice, self.theme.error)]);
        }
        frame.lines.push(Vec::new());
    }

    fn home(&self, lines: &mut Vec<SpanLine>) {
        lines.push(vec![Span::styled("Welcome", self.theme.title)]);
        lines.push(vec![Span::new(
            "Start typing to search the catalog, or open Products with alt+p.",
        )]);
    }

    fn listing(&self, state: &StorefrontState, lines: &mut Vec<SpanLine>) {
        let term = state.search().url_term();
        let mut title: SpanLine = vec![Span::styled("Products", self.theme.title)];
        if !term.is_empty() {
            title.push(Span::styled(format!("  matching \"{term}\""), self.theme.muted));
        }
        lines.push(title);
        lines.push(Vec::new());

        let listing = state.listing();
        if listing.source().is_empty() {
            lines.push(vec![Span::styled(
                "No products found. Try another search term.",
                self.theme.notice,
            )]);
            return;
        }

        for (index, product) in listing.current_items().iter().enumerate() {
            lines.push(self.product_row(product, index == state.selected()));
        }
        if listing.current_items().is_empty() {
            lines.push(vec![Span::styled(
                "Nothing on this page.",
                self.theme.muted,
            )]);
        }

        let controls = listing.controls();
        if !controls.visible() {
            return;
        }
        lines.push(Vec::new());
        let mut pager: SpanLine = Vec::new();
        pager.push(Span::styled(
            "‹ Prev",
            if controls.previous_enabled {
                self.theme.nav_active
            } else {
                self.theme.muted
            },
        ));
        for page in controls.pages() {
            pager.push(Span::new(" "));
            if page == controls.current {
                pager.push(Span::styled(format!("[{page}]"), self.theme.selected));
            } else {
                pager.push(Span::styled(page.to_string(), self.theme.nav));
            }
        }
        pager.push(Span::new(" "));
        pager.push(Span::styled(
            "Next ›",
            if controls.next_enabled {
                self.theme.nav_active
            } else {
                self.theme.muted
            },
        ));
        lines.push(pager);
    }

    fn product_row(&self, product: &Product, selected: bool) -> SpanLine {
        let mut row: SpanLine = Vec::new();
        if selected {
            row.push(Span::styled("› ", self.theme.selected));
            row.push(Span::styled(product.name.as_str(), self.theme.selected));
        } else {
            row.push(Span::new("  "));
            row.push(Span::new(product.name.as_str()));
        }
        if let Some(category) = &product.category {
            row.push(Span::styled(format!("  ({category})"), self.theme.muted));
        }
        row.push(Span::new("  "));
        row.push(Span::styled(format_price(product.price), self.theme.price));
        if !product.in_stock() {
            row.push(Span::styled("  out of stock", self.theme.notice));
        }
        row
    }

    fn detail(&self, detail: Option<&DetailView>, lines: &mut Vec<SpanLine>) {
        match detail {
            Some(DetailView::Found(product)) => {
                lines.push(vec![Span::styled(product.name.as_str(), self.theme.title)]);
                if let Some(category) = &product.category {
                    lines.push(vec![Span::styled(category.as_str(), self.theme.muted)]);
                }
                lines.push(vec![Span::styled(
                    format_price(product.price),
                    self.theme.price,
                )]);
                lines.push(if product.in_stock() {
                    vec![Span::new(format!("{} in stock", product.stock))]
                } else {
                    vec![Span::styled("Out of stock", self.theme.notice)]
                });
                if !product.description.is_empty() {
                    lines.push(Vec::new());
                    lines.extend(
                        product
                            .description
                            .lines()
                            .map(|line| vec![Span::new(line)]),
                    );
                }
            }
            Some(DetailView::NotFound(id)) => {
                lines.push(vec![Span::styled(
                    format!("Product not found: {id}"),
                    self.theme.error,
                )]);
            }
            Some(DetailView::Unavailable { id, reason }) => {
                lines.push(vec![Span::styled(
                    format!("Could not load product {id}: {reason}"),
                    self.theme.error,
                )]);
            }
            None => lines.push(vec![Span::styled("Loading...", self.theme.muted)]),
        }
    }

    fn static_page(&self, title: &str, body: &[&str], lines: &mut Vec<SpanLine>) {
        lines.push(vec![Span::styled(title, self.theme.title)]);
        lines.push(Vec::new());
        lines.extend(body.iter().map(|line| vec![Span::new(*line)]));
    }
}
