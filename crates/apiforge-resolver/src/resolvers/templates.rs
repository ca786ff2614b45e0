// crates/apiforge-resolver/src/resolvers/templates.rs
// ============================================================================
// Module: Templates Resolver
// Description: Cascades template paths slot by slot.
// Purpose: Give every collection endpoint a template for each response kind.
// Dependencies: apiforge-config
// ============================================================================

//! ## Overview
//! Each [`TemplateSlot`] inherits independently: provider → collection →
//! endpoint, collections segment only. Explicit child templates are kept.

use apiforge_config::ApiConfig;
use apiforge_config::TemplateSlot;
use apiforge_config::TemplateSpec;

use crate::cascade::inherit;
use crate::error::ResolveError;
use crate::interfaces::Resolver;

/// Resolves templates for the collections segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplatesResolver;

impl Resolver for TemplatesResolver {
    fn name(&self) -> &'static str {
        "templates"
    }

    fn resolve(&self, mut config: ApiConfig) -> Result<ApiConfig, ResolveError> {
        for provider in config.providers.values_mut() {
            let provider_spec = &provider.templates;
            for collection in provider.collections.values_mut() {
                cascade(&mut collection.templates, provider_spec);
                let collection_spec = &collection.templates;
                for endpoint in collection.endpoints.values_mut() {
                    cascade(&mut endpoint.templates, collection_spec);
                }
            }
        }
        Ok(config)
    }
}

/// Fills every unset slot from the parent.
fn cascade(child: &mut TemplateSpec, parent: &TemplateSpec) {
    for slot in TemplateSlot::ALL {
        inherit(child.slot_mut(slot), parent.slot(slot));
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_inherit_independently() {
        let parent = TemplateSpec {
            list: Some("api/list.html".to_string()),
            item: Some("api/item.html".to_string()),
            ..TemplateSpec::default()
        };
        let mut child = TemplateSpec {
            item: Some("books/item.html".to_string()),
            ..TemplateSpec::default()
        };
        cascade(&mut child, &parent);
        assert_eq!(child.list.as_deref(), Some("api/list.html"));
        assert_eq!(child.item.as_deref(), Some("books/item.html"));
        assert_eq!(child.error, None);
    }
}
