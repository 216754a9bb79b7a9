use std::rc::Rc;
use std::sync::Arc;

use contracts::domain::a002_translation_sound_record as record;
use contracts::shared::grid::{ColumnFilter, DataSource, EndpointDataSource};
use leptos::prelude::*;

use crate::shared::ajax::AjaxClient;
use crate::shared::api_utils::controller_base;
use crate::shared::config::use_grid_config;
use crate::shared::grid::GridView;
use crate::system::auth::context::use_credentials;

#[component]
pub fn TranslationSoundRecordList() -> impl IntoView {
    let config = use_grid_config();
    let credentials = use_credentials();

    move || {
        let Some(credentials) = credentials.get() else {
            return view! { <p class="notice">"Sign in to see your recorded translations."</p> }.into_any();
        };

        let schema = match record::schema(&credentials.user_id) {
            Ok(schema) => Arc::new(schema),
            Err(e) => {
                log::error!("sound record schema rejected: {}", e);
                return view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__text">{format!("Screen unavailable: {}", e)}</span>
                    </div>
                }
                .into_any();
            }
        };

        let loading = RwSignal::new(0);
        let user_id = credentials.user_id.clone();
        let source: Rc<dyn DataSource> = Rc::new(
            EndpointDataSource::new(
                record::routes(&controller_base(&config)),
                credentials,
                Rc::new(AjaxClient::with_loading(loading)),
                schema.clone(),
            )
            .with_default_filters(vec![ColumnFilter::new("CreatedByUserId", user_id)]),
        );

        view! { <GridView title="Translations with sound" schema=schema source=source loading=loading /> }
            .into_any()
    }
}
