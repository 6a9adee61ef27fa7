//! DOM side of page initialization.

use darlingx_core::config::MAIN_SELECTOR;
use darlingx_core::host::PageRenderer;
use darlingx_core::initializer::{BookDetailsView, Preferences, ShelfPlan};
use darlingx_core::models::BookSort;
use leptos::mount::mount_to;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlImageElement, HtmlInputElement, HtmlSelectElement};

use super::host::WebHost;
use super::listener::{EventListener, MountPoint};
use super::storage::LocalStore;
use crate::components::quotes::Guestbook;
use crate::components::shelf::BookShelf;
use crate::config::{DETAIL_COVER_WIDTH, SIZED_ATTR, dom_ids};
use crate::utils::dom;

impl PageRenderer for WebHost {
    fn render_books(&self, plan: &ShelfPlan) {
        let Some(grid) = dom::by_id::<HtmlElement>(dom_ids::BOOKS_GRID) else {
            log::debug!("books page without #{}", dom_ids::BOOKS_GRID);
            return;
        };

        let sort = ArcRwSignal::new(plan.sort);
        let covers = ArcRwSignal::new(plan.show_covers);

        if let Some(select) = dom::query(dom_ids::SORT_SELECT)
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_value(plan.sort.label());
            let sort = sort.clone();
            let source = select.clone();
            self.keep(EventListener::new(&select, "change", move |_| {
                let chosen = BookSort::from_label(&source.value());
                Preferences::new(&LocalStore).set_sort(chosen);
                sort.set(chosen);
            }));
        }

        if let Some(toggle) = dom::by_id::<HtmlInputElement>(dom_ids::COVER_TOGGLE) {
            toggle.set_checked(plan.show_covers);
            let covers = covers.clone();
            let source = toggle.clone();
            self.keep(EventListener::new(&toggle, "change", move |_| {
                let show = source.checked();
                Preferences::new(&LocalStore).set_show_covers(show);
                covers.set(show);
            }));
        }

        // Static placeholder cards are replaced by the mounted shelf
        grid.set_inner_html("");
        let books = plan.books.clone();
        let handle = mount_to(grid, move || view! { <BookShelf books=books sort=sort covers=covers /> });
        self.keep(handle);
    }

    fn render_book_details(&self, view: &BookDetailsView) {
        use dom_ids::details;

        if let Some(cover) = dom::by_id::<HtmlImageElement>(details::COVER) {
            cover.set_src(&view.cover_src);
            cover.set_alt(&view.cover_alt);
        }
        dom::set_text(details::TITLE, &view.title);
        dom::set_text(details::AUTHOR, &view.author_line);
        dom::set_text(details::DATE_READ, &view.date_read_line);
        dom::set_text(details::DESCRIPTION, &view.description);
        dom::set_text(details::PAGES, &view.pages);
        dom::set_text(details::PUBLISH_DATE, &view.publish_date);
        dom::set_text(details::GENRE, &view.genre);
    }

    fn attach_guestbook(&self) -> bool {
        let Some(document) = dom::document() else {
            return false;
        };
        let Some(about) = dom::query(dom_ids::ABOUT_SECTION) else {
            return false;
        };
        let Some(static_quotes) = dom::query_all(&about, dom_ids::QUOTES_CONTAINER)
            .into_iter()
            .next()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return false;
        };
        let Ok(slot) = document
            .create_element("div")
            .and_then(|el| el.dyn_into::<HtmlElement>().map_err(Into::into))
        else {
            return false;
        };
        if about.insert_before(&slot, Some(&static_quotes)).is_err() {
            log::warn!("could not insert guestbook");
            return false;
        }

        let handle = mount_to(slot.clone(), move || view! { <Guestbook static_quotes=static_quotes /> });
        // Unmount before the slot leaves the document
        self.keep(handle);
        self.keep(MountPoint(slot.into()));
        true
    }

    fn normalize_images(&self) {
        let Some(root) = dom::document().and_then(|d| d.document_element()) else {
            return;
        };
        let mobile = dom::is_mobile_or_tablet();

        for cover in dom::query_all(&root, ".book-cover") {
            if cover.has_attribute(SIZED_ATTR) {
                continue;
            }
            size_cover(&cover, mobile);
        }

        for image in dom::query_all(&root, &format!("{MAIN_SELECTOR} img")) {
            if image.has_attribute("width") || image.has_attribute("height") {
                continue;
            }
            if let Some(image) = image.dyn_ref::<HtmlElement>() {
                let style = image.style();
                let _ = style.set_property("max-width", "100%");
                let _ = style.set_property("height", "auto");
            }
        }

        if let Some(grid) = dom::by_id::<Element>(dom_ids::BOOKS_GRID) {
            let _ = grid.class_list().add_1(dom_ids::INITIALIZED_CLASS);
        }
    }

    fn release_widgets(&self) {
        self.drop_widgets();
    }
}

fn size_cover(cover: &Element, mobile: bool) {
    let Some(html) = cover.dyn_ref::<HtmlElement>() else {
        return;
    };
    let style = html.style();
    let in_details = cover.closest(".book-details").ok().flatten().is_some();

    if in_details {
        let _ = cover.class_list().add_1("detail-view");
        if mobile {
            let _ = style.set_property("width", "100%");
            let _ = style.set_property("max-width", DETAIL_COVER_WIDTH);
        } else {
            let _ = style.set_property("width", DETAIL_COVER_WIDTH);
        }
    } else {
        let _ = style.set_property("width", "100%");
        let _ = style.set_property("max-width", "100%");
    }
    let _ = style.set_property("height", "auto");
    let _ = cover.set_attribute(SIZED_ATTR, "");
}
