//! Analyser tap on the page's `<audio>` element.

use crate::constants::{ANALYSER_SMOOTHING, AUDIO_ID, FFT_SIZE};
use anyhow::anyhow;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Per-frame byte spectrum of whatever the audio element is playing.
///
/// Routing is element -> analyser -> destination so playback stays audible.
pub struct EnergyFeed {
    audio_ctx: web::AudioContext,
    analyser: web::AnalyserNode,
    element: web::HtmlMediaElement,
    buf: Vec<u8>,
    started: bool,
}

impl EnergyFeed {
    pub fn new(document: &web::Document) -> anyhow::Result<Self> {
        let element = document
            .get_element_by_id(AUDIO_ID)
            .ok_or_else(|| anyhow!("missing #{AUDIO_ID}"))?
            .dyn_into::<web::HtmlMediaElement>()
            .map_err(|e| anyhow!("#{AUDIO_ID} is not a media element: {:?}", e))?;
        let audio_ctx = web::AudioContext::new().map_err(|e| anyhow!("{:?}", e))?;
        let source = audio_ctx
            .create_media_element_source(&element)
            .map_err(|e| anyhow!("media source: {:?}", e))?;
        let analyser = web::AnalyserNode::new(&audio_ctx).map_err(|e| anyhow!("analyser: {:?}", e))?;
        analyser.set_fft_size(FFT_SIZE);
        analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING);
        source
            .connect_with_audio_node(&analyser)
            .map_err(|e| anyhow!("connect source: {:?}", e))?;
        analyser
            .connect_with_audio_node(&audio_ctx.destination())
            .map_err(|e| anyhow!("connect destination: {:?}", e))?;
        let bins = analyser.frequency_bin_count() as usize;
        log::info!("[audio] analyser ready, {bins} bins");
        Ok(Self {
            audio_ctx,
            analyser,
            element,
            buf: vec![0; bins],
            started: false,
        })
    }

    /// Fresh spectrum for this frame, or `None` until playback has begun.
    ///
    /// Once the element has played, later pauses still return a (silent or
    /// decaying) spectrum rather than `None`.
    pub fn latest(&mut self) -> Option<&[u8]> {
        if !self.started {
            if self.element.paused() {
                return None;
            }
            self.started = true;
            _ = self.audio_ctx.resume();
            log::info!("[audio] playback started");
        }
        self.analyser.get_byte_frequency_data(&mut self.buf);
        Some(&self.buf)
    }
}

impl Drop for EnergyFeed {
    fn drop(&mut self) {
        _ = self.audio_ctx.close();
    }
}
