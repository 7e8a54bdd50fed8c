//! CMX3600 EDL generation for matched audio/video pairs.
//!
//! One EDL per shared key: a blank filler event delays whichever take
//! rolled later, so both land on a common timeline at their sync points.

use std::path::Path;

use log::info;

use crate::scan::TakeRecord;

/// Format seconds as non-drop-frame `HH:MM:SS:FF` timecode.
pub fn format_timecode(seconds: f64, fps: f64) -> String {
    let mut rem = seconds;
    let hours = (rem / 3600.0).floor();
    rem -= hours * 3600.0;
    let minutes = (rem / 60.0).floor();
    rem -= minutes * 60.0;
    let secs = rem.floor();
    rem -= secs;
    let frames = (rem * fps).round();
    format!(
        "{:02}:{:02}:{:02}:{:02}",
        hours as u32, minutes as u32, secs as u32, frames as u32
    )
}

/// Emit one EDL per audio/video pair sharing a key. Keys present on only
/// one side silently produce no output.
pub fn generate_edls(
    videos: &[TakeRecord],
    audios: &[TakeRecord],
    fps: f64,
    edl_dir: &Path,
) -> std::io::Result<()> {
    for video in videos {
        for audio in audios {
            if video.key == audio.key {
                write_edl(video, audio, fps, edl_dir)?;
            }
        }
    }
    Ok(())
}

/// Write the EDL aligning one video take with its matching audio take.
pub fn write_edl(
    video: &TakeRecord,
    audio: &TakeRecord,
    fps: f64,
    edl_dir: &Path,
) -> std::io::Result<()> {
    let [a, b, c] = video.key;
    let key = format!("{a}-{b}-{c}");
    let path = edl_dir.join(format!("{key}.edl"));
    info!("generating {}", path.display());

    let sync_sec_a = audio.sync_offset as f64 / f64::from(audio.sample_rate);
    let sync_sec_v = video.sync_offset as f64 / f64::from(video.sample_rate);
    let len_sec_a = audio.length_samples as f64 / f64::from(audio.sample_rate);
    let len_sec_v = video.length_samples as f64 / f64::from(video.sample_rate);

    // Positive when the audio recorder rolled first.
    let audio_lead = sync_sec_a - sync_sec_v;

    let mut out = String::new();
    out.push_str(&format!("TITLE: {key}   FORMAT: CMX3600\n"));
    out.push_str("FCM: NON-DROP FRAME\n");
    if audio_lead > 0.0 {
        let tc_v_start = format_timecode(audio_lead, fps);
        let tc_v_stop = format_timecode(audio_lead + len_sec_v, fps);
        let tc_a_len = format_timecode(len_sec_a, fps);
        let tc_v_len = format_timecode(len_sec_v, fps);
        out.push_str(&format!(
            "001  BL         V    C         00:00:00:00 {tc_v_start} 00:00:00:00 {tc_v_start}\n"
        ));
        out.push_str(&format!(
            "002  {:10} V    C         00:00:00:00 {tc_v_len} {tc_v_start} {tc_v_stop}\n",
            format!("{key}_v")
        ));
        out.push_str(&format!(
            "003  {:10} AA   C         00:00:00:00 {tc_a_len} 00:00:00:00 {tc_a_len}\n",
            format!("{key}_a")
        ));
    } else {
        let video_lead = -audio_lead;
        let tc_a_start = format_timecode(video_lead, fps);
        let tc_a_stop = format_timecode(video_lead + len_sec_a, fps);
        let tc_a_len = format_timecode(len_sec_a, fps);
        let tc_v_len = format_timecode(len_sec_v, fps);
        out.push_str(&format!(
            "001  BL         AA   C         00:00:00:00 {tc_a_start} 00:00:00:00 {tc_a_start}\n"
        ));
        out.push_str(&format!(
            "002  {:10} V    C         00:00:00:00 {tc_v_len} 00:00:00:00 {tc_v_len}\n",
            format!("{key}_v")
        ));
        out.push_str(&format!(
            "003  {:10} AA   C         00:00:00:00 {tc_a_len} {tc_a_start} {tc_a_stop}\n",
            format!("{key}_a")
        ));
    }

    std::fs::write(&path, out)
}
