use regex::Regex;

use crate::catalog::ProductId;
use crate::config::RoutesConfig;
use crate::error::{Error, Result};
use crate::routing::location::{Location, decode, encode, normalize_path};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Listing,
    Detail(ProductId),
    About,
    Contact,
    Cart,
    Other(String),
}

impl Route {
    pub fn is_listing(&self) -> bool {
        matches!(self, Route::Listing)
    }

    pub fn is_detail(&self) -> bool {
        matches!(self, Route::Detail(_))
    }
}

/// Maps paths to [`Route`]s. Detail routes live one segment below the
/// listing path (`/products/{id}`).
#[derive(Debug, Clone)]
pub struct RouteTable {
    paths: RoutesConfig,
    detail: Regex,
}

impl RouteTable {
    /// Paths are normalized the way [`Location`] normalizes them, so a
    /// configured `/products/` still matches `/products`.
    pub fn new(paths: &RoutesConfig) -> Result<Self> {
        let paths = RoutesConfig {
            home: normalize_path(&paths.home),
            listing: normalize_path(&paths.listing),
            about: normalize_path(&paths.about),
            contact: normalize_path(&paths.contact),
            cart: normalize_path(&paths.cart),
        };
        let listing = paths.listing.trim_end_matches('/');
        let pattern = format!("^{}/([^/?#]+)/?$", regex::escape(listing));
        let detail = Regex::new(&pattern)
            .map_err(|err| Error::InvalidConfig(format!("detail route pattern: {err}")))?;
        Ok(Self { paths, detail })
    }

    pub fn resolve(&self, location: &Location) -> Route {
        let path = location.path();
        if path == self.paths.listing {
            return Route::Listing;
        }
        if let Some(captures) = self.detail.captures(path) {
            return Route::Detail(ProductId::new(decode(&captures[1])));
        }
        if path == self.paths.home {
            Route::Home
        } else if path == self.paths.about {
            Route::About
        } else if path == self.paths.contact {
            Route::Contact
        } else if path == self.paths.cart {
            Route::Cart
        } else {
            Route::Other(path.to_string())
        }
    }

    pub fn location_of(&self, route: &Route) -> Location {
        match route {
            Route::Home => Location::new(&self.paths.home),
            Route::Listing => Location::new(&self.paths.listing),
            Route::Detail(id) => Location::new(format!(
                "{}/{}",
                self.paths.listing.trim_end_matches('/'),
                encode(id.as_str())
            )),
            Route::About => Location::new(&self.paths.about),
            Route::Contact => Location::new(&self.paths.contact),
            Route::Cart => Location::new(&self.paths.cart),
            Route::Other(path) => Location::new(path),
        }
    }
}
