//! Screen implementations. Each screen is a top-level Component.

pub mod filter_modal;
pub mod home;
pub mod search;

use storefront_core::{CategoryDataSource, ProductDataSource, ProductFetchController};

use crate::component::Component;
use crate::screen::ScreenId;

use self::home::HomeScreen;
use self::search::SearchPane;

/// Create both screens over one shared catalog.
///
/// `category` seeds the search screen's first load.
pub fn create_screens<C>(catalog: C, category: Option<String>) -> Vec<(ScreenId, Box<dyn Component>)>
where
    C: ProductDataSource + CategoryDataSource + Clone,
{
    let controller = ProductFetchController::new(catalog.clone());
    let home: Box<dyn Component> = Box::new(HomeScreen::new(catalog));
    let search: Box<dyn Component> = Box::new(SearchPane::new(controller, category));
    vec![(ScreenId::Home, home), (ScreenId::Search, search)]
}
