use alloc::vec::Vec;

use crate::codec::{BeanCodecBuilder, ViewGuardedWriter};
use crate::config::BindConfig;

/// Installs the view-filtered writers on `builder`.
///
/// A writer without views is kept, unguarded, only if views include
/// unviewed properties by default. A writer with views is always kept,
/// guarded by its views. When no writer has views and the default inclusion
/// is on, the filtered list would equal the full list and none is installed.
pub(super) fn process_views(config: &BindConfig, builder: &mut BeanCodecBuilder) {
    let include_by_default = config.default_view_inclusion;
    let mut views_found = 0_usize;

    let filtered: Vec<Option<ViewGuardedWriter>> = builder
        .properties()
        .iter()
        .map(|writer| {
            if writer.views().is_empty() {
                include_by_default.then(|| ViewGuardedWriter::unconditional(writer.clone()))
            } else {
                views_found += 1;
                Some(ViewGuardedWriter::guarded(writer.clone(), writer.views().clone()))
            }
        })
        .collect();

    if include_by_default && views_found == 0 {
        return;
    }
    builder.set_filtered_properties(Some(filtered));
}
