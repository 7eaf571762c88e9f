//! TagIndex trait implementation for SqliteIndex.

use super::SqliteIndex;
use super::attributes::read_attribute;
use super::stats::list_tag_stats;
use crate::domain::{NoteAttribute, SeekPositions, TagDelta, TagQuery};
use crate::index::{FilterPage, IndexResult, TagIndex, TagStatsPage};

impl TagIndex for SqliteIndex {
    fn attribute(&self, name: &str) -> IndexResult<Option<NoteAttribute>> {
        read_attribute(&self.conn, name)
    }

    fn index_note(&mut self, name: &str, attribute: &NoteAttribute) -> IndexResult<TagDelta> {
        let tx = self.transaction()?;
        let previous = tx.put_attribute(name, attribute)?;
        let delta = TagDelta::between(previous.as_ref(), attribute);
        tx.apply_delta(name, &delta)?;
        tx.commit()?;
        Ok(delta)
    }

    fn filter(
        &mut self,
        query: &TagQuery,
        seek: &SeekPositions,
        max: usize,
    ) -> IndexResult<FilterPage> {
        if query.is_empty() {
            return Ok(FilterPage::empty());
        }
        let tx = self.transaction()?;
        let page = tx.filter(query, seek, max)?;
        tx.commit()?;
        Ok(page)
    }

    fn tag_stats(&self, seek: Option<&str>, limit: usize) -> IndexResult<TagStatsPage> {
        list_tag_stats(&self.conn, seek, limit)
    }
}
