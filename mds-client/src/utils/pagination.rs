use std::fmt;
use std::future::Future;

use crate::error::ClientError;
use crate::models::page::{Page, PageQuery};

/// A walk that stopped on a fetch error, with everything read before it.
#[derive(Debug)]
pub struct PartialPages<T, E> {
    pub items: Vec<T>,
    pub source: E,
}

impl<T, E: fmt::Display> fmt::Display for PartialPages<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "page fetch failed after {} item(s): {}",
            self.items.len(),
            self.source
        )
    }
}

impl<T, E> std::error::Error for PartialPages<T, E>
where
    T: fmt::Debug,
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl<T> From<PartialPages<T, ClientError>> for ClientError {
    fn from(partial: PartialPages<T, ClientError>) -> Self {
        partial.source
    }
}

/// Walks every page starting at `start`, in order.
///
/// The next cursor is `number + 1` of the page just read with `size` carried
/// over from `start`. The walk stops after a page with `totalPages == 0` or
/// `number == totalPages - 1`. Callers pick the page size; nothing is
/// defaulted here.
///
/// A page numbered below the one requested fails the walk with
/// [`ClientError::PageOutOfOrder`], so a server echoing a stale cursor cannot
/// keep it going forever.
pub async fn collect_pages<T, E, F, Fut>(
    start: PageQuery,
    mut fetch: F,
) -> Result<Vec<T>, PartialPages<T, E>>
where
    E: From<ClientError>,
    F: FnMut(PageQuery) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let mut items = Vec::new();
    let mut query = start;

    loop {
        let page = match fetch(query).await {
            Ok(page) => page,
            Err(source) => return Err(PartialPages { items, source }),
        };
        if page.info.number < query.index {
            let source = ClientError::PageOutOfOrder {
                requested: query.index,
                returned: page.info.number,
            };
            return Err(PartialPages {
                items,
                source: source.into(),
            });
        }
        items.extend(page.items);

        if page.info.is_last() {
            break;
        }
        query = PageQuery {
            index: page.info.number.saturating_add(1),
            size: start.size,
        };
    }

    Ok(items)
}
