use chrono::{NaiveDate, NaiveDateTime};
use js_sys::Date;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use rtpwall_core::{
    compute_display, compute_multiplier, compute_rtp, epoch_minute, millis_until_next_minute,
    render_board, Catalog, GalleryConfig, ProviderFilter,
};
use rtpwall_shared::CatalogManifest;

/// Calendar fields as a JS `Date` reports them: zero-based month.
pub fn local_fields(
    year: i32,
    month0: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    millis: u32,
) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month0.checked_add(1)?, day)
        .and_then(|d| d.and_hms_milli_opt(hour, minute, second, millis))
}

/// Local calendar fields of a JS `Date`, exactly what the page displays.
fn local_time(date: &Date) -> Result<NaiveDateTime, JsError> {
    local_fields(
        date.get_full_year() as i32,
        date.get_month(),
        date.get_date(),
        date.get_hours(),
        date.get_minutes(),
        date.get_seconds(),
        date.get_milliseconds(),
    )
    .ok_or_else(|| JsError::new("invalid date"))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

/// Browser handle on a validated display config. The page keeps one instance
/// and passes the current `Date` on every call.
#[wasm_bindgen]
pub struct Gallery {
    config: GalleryConfig,
}

#[wasm_bindgen]
impl Gallery {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<Gallery, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            GalleryConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| JsError::new(&e.to_string()))?
        };
        Ok(Gallery { config })
    }

    #[wasm_bindgen(js_name = computeRtp)]
    pub fn compute_rtp(&self, game_id: &str, now: &Date) -> Result<u32, JsError> {
        Ok(compute_rtp(&self.config, game_id, local_time(now)?))
    }

    #[wasm_bindgen(js_name = computeMultiplier)]
    pub fn compute_multiplier(&self, game_id: &str, now: &Date) -> Result<JsValue, JsError> {
        to_js(compute_multiplier(&self.config, game_id, local_time(now)?))
    }

    #[wasm_bindgen(js_name = computeDisplay)]
    pub fn compute_display(&self, game_id: &str, now: &Date) -> Result<JsValue, JsError> {
        to_js(&compute_display(&self.config, game_id, local_time(now)?))
    }

    /// `provider` of `undefined` shows every game.
    #[wasm_bindgen(js_name = renderBoard)]
    pub fn render_board(
        &self,
        manifest: JsValue,
        provider: Option<String>,
        now: &Date,
    ) -> Result<JsValue, JsError> {
        let manifest: CatalogManifest =
            serde_wasm_bindgen::from_value(manifest).map_err(|e| JsError::new(&e.to_string()))?;
        let catalog = Catalog::from_manifest(&manifest)?;
        let filter = ProviderFilter::from(provider);
        to_js(&render_board(&self.config, &catalog, &filter, local_time(now)?))
    }

    pub fn fingerprint(&self) -> String {
        self.config.fingerprint()
    }
}

#[wasm_bindgen(js_name = epochMinute)]
pub fn epoch_minute_js(now: &Date) -> Result<f64, JsError> {
    // i64 does not cross into JS as a number
    Ok(epoch_minute(local_time(now)?) as f64)
}

/// Timeout for re-arming the per-minute refresh.
#[wasm_bindgen(js_name = millisUntilNextMinute)]
pub fn millis_until_next_minute_js(now: &Date) -> Result<u32, JsError> {
    Ok(millis_until_next_minute(local_time(now)?))
}
