//! Book shelf for the books page.
//!
//! Cards use the site's global classes (`book-card`, `book-cover`, ...) so the
//! stylesheet and the image-sizing pass treat them like server markup.

use darlingx_core::models::{Book, BookSort};
use leptos::prelude::*;
use web_sys::Element;

use crate::config::dom_ids;
use crate::utils::dom;

/// Reading list in the selected order, with covers shown or hidden.
///
/// `sort` and `covers` are driven by the page's own controls.
#[component]
pub fn BookShelf(
    books: Vec<Book>,
    sort: ArcRwSignal<BookSort>,
    covers: ArcRwSignal<bool>,
) -> impl IntoView {
    Effect::new(move |_| {
        let hide = !covers.get();
        if let Some(grid) = dom::by_id::<Element>(dom_ids::BOOKS_GRID) {
            let _ = grid
                .class_list()
                .toggle_with_force(dom_ids::HIDE_COVERS_CLASS, hide);
        }
    });

    let ordered = move || {
        let mut shelf: Vec<&Book> = books.iter().collect();
        sort.get().apply(&mut shelf);
        shelf.into_iter().cloned().collect::<Vec<_>>()
    };

    view! {
        <For
            each=ordered
            key=|book| book.id.clone()
            children=move |book: Book| view! { <BookCard book=book /> }
        />
    }
}

#[component]
fn BookCard(book: Book) -> impl IntoView {
    let href = book.details_href();
    let alt = format!("{} cover", book.title);

    view! {
        <div class="book-card">
            <a class="book-link" href=href>
                <img class="book-cover" src=book.cover_image alt=alt loading="lazy" />
                <h2 class="book-title">{book.title}</h2>
                <h3 class="book-author">{book.author}</h3>
            </a>
        </div>
    }
}
