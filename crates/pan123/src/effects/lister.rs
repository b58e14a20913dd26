use tokio::time::Instant;

use super::client::Pan123;
use super::http::{HttpTransport, Method};
use crate::core::{Reconciliation, is_last_page, list_query, reconcile};
use crate::data::{FileEntry, ListData, UserInfo};
use crate::error::{Error, Result};

impl<T: HttpTransport> Pan123<T> {
    /// List every non-trashed child of `parent_id` (`0` is the root).
    ///
    /// Pages are fetched in order until one is empty or carries the end
    /// sentinel. A listing that has not ended after `max_pages` pages fails
    /// with [`Error::PageLimitExceeded`]. A count that disagrees with the
    /// server's reported total is logged and the listing is returned as is.
    pub async fn list_directory(&self, parent_id: i64) -> Result<Vec<FileEntry>> {
        self.list_pages(parent_id, None).await
    }

    /// Like [`Pan123::list_directory`], with every page request bounded by
    /// `deadline`.
    pub async fn list_directory_before(
        &self,
        parent_id: i64,
        deadline: Instant,
    ) -> Result<Vec<FileEntry>> {
        self.list_pages(parent_id, Some(deadline)).await
    }

    /// Account details for the logged-in user.
    pub async fn user_info(&self) -> Result<UserInfo> {
        self.request(&self.endpoints.user_info, Method::Get, |_| {}).await
    }

    async fn list_pages(&self, parent_id: i64, deadline: Option<Instant>) -> Result<Vec<FileEntry>> {
        let page_size = self.config.page_size;
        let mut entries = Vec::new();

        for page in 1..=self.config.max_pages {
            if let Some(limiter) = &self.limiter {
                limiter.acquire().await?;
            }

            let query = list_query(parent_id, page, page_size);
            let data: ListData = self
                .request(&self.endpoints.file_list, Method::Get, |spec| {
                    spec.queries(query.iter().cloned());
                    if let Some(deadline) = deadline {
                        spec.deadline(deadline);
                    }
                })
                .await?;

            let last = is_last_page(&data);
            let reported = data.total;
            entries.extend(data.entries);
            tracing::debug!(parent_id, page, listed = entries.len(), next = %data.next, "listed page");

            if last {
                if let Reconciliation::Mismatch { listed, reported } =
                    reconcile(entries.len(), reported)
                {
                    tracing::warn!(parent_id, listed, reported, "listed entry count differs from reported total");
                }
                return Ok(entries);
            }
        }

        Err(Error::PageLimitExceeded(self.config.max_pages))
    }
}
