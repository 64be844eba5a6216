use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use swisseph::swe::{calc_ut, set_ephe_path};

use crate::ephemeris::provider::PositionProvider;
use crate::ephemeris::types::{
    EphemerisConfig, EphemerisError, NodeType, RawPosition, RawPositions,
};
use crate::graha::Graha;

// Swiss Ephemeris body codes
const SE_SUN: u32 = 0;
const SE_MOON: u32 = 1;
const SE_MERCURY: u32 = 2;
const SE_VENUS: u32 = 3;
const SE_MARS: u32 = 4;
const SE_JUPITER: u32 = 5;
const SE_SATURN: u32 = 6;
const SE_MEAN_NODE: u32 = 10;
const SE_TRUE_NODE: u32 = 11;

const SEFLG_SWIEPH: i32 = 2;
const SEFLG_MOSEPH: i32 = 4;
const SEFLG_SPEED: i32 = 256;

const CALC_FLAGS: u32 = (SEFLG_SWIEPH | SEFLG_SPEED) as u32;

/// Swiss Ephemeris backed [`PositionProvider`].
///
/// Calls into the C library are serialized; it keeps internal file state.
pub struct SwissEphemerisAdapter {
    inner: Arc<SwissInner>,
}

struct SwissInner {
    ephemeris_path: PathBuf,
    // Handed to the C library before every batch; its path is thread-local.
    ephe_path_arg: String,
    node: NodeType,
    lock: Mutex<()>,
}

impl SwissEphemerisAdapter {
    /// Create an adapter; fails when the data directory or its files are missing.
    pub fn new(config: &EphemerisConfig) -> Result<Self, EphemerisError> {
        let path = config.resolve_path();
        validate_ephemeris_dir(&path)?;
        let ephe_path_arg = ephe_path_string(&path)?;
        log::debug!("swiss ephemeris data at {}", path.display());

        Ok(Self {
            inner: Arc::new(SwissInner {
                ephemeris_path: path,
                ephe_path_arg,
                node: config.node,
                lock: Mutex::new(()),
            }),
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.inner.ephemeris_path
    }
}

impl SwissInner {
    fn body_code(&self, body: Graha) -> Option<u32> {
        match body {
            Graha::Sun => Some(SE_SUN),
            Graha::Moon => Some(SE_MOON),
            Graha::Mercury => Some(SE_MERCURY),
            Graha::Venus => Some(SE_VENUS),
            Graha::Mars => Some(SE_MARS),
            Graha::Jupiter => Some(SE_JUPITER),
            Graha::Saturn => Some(SE_SATURN),
            Graha::Rahu => Some(match self.node {
                NodeType::Mean => SE_MEAN_NODE,
                NodeType::True => SE_TRUE_NODE,
            }),
            Graha::Ketu => None,
        }
    }

    fn calc_body(&self, body: Graha, jd_ut: f64) -> Result<RawPosition, EphemerisError> {
        let code = self.body_code(body).ok_or(EphemerisError::MissingBody { body })?;

        let result = calc_ut(jd_ut, code, CALC_FLAGS).map_err(|e| {
            EphemerisError::CalculationFailed {
                body,
                jd: jd_ut,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        check_return_flags(body, jd_ut, result.code)?;

        let out = result.out;
        if out.iter().take(4).any(|v| !v.is_finite()) {
            return Err(EphemerisError::CalculationFailed {
                body,
                jd: jd_ut,
                message: "non-finite position".to_string(),
            });
        }

        Ok(RawPosition {
            longitude: out[0],
            latitude: out[1],
            distance: out[2],
            speed: out[3],
        })
    }

    fn calc_all(&self, jd_ut: f64) -> Result<RawPositions, EphemerisError> {
        let _guard = self.lock.lock().map_err(|_| EphemerisError::Unavailable {
            provider: "swisseph".to_string(),
            message: "ephemeris lock poisoned".to_string(),
        })?;
        set_ephe_path(&self.ephe_path_arg);

        let mut positions = RawPositions::new();
        for body in Graha::PROVIDED {
            positions.insert(body, self.calc_body(body, jd_ut)?);
        }
        Ok(positions)
    }
}

#[async_trait]
impl PositionProvider for SwissEphemerisAdapter {
    fn name(&self) -> &str {
        "swisseph"
    }

    async fn positions(&self, jd_ut: f64) -> Result<RawPositions, EphemerisError> {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || inner.calc_all(jd_ut))
            .await
            .map_err(|e| EphemerisError::Unavailable {
                provider: "swisseph".to_string(),
                message: e.to_string(),
            })?
    }
}

/// Reject results the library computed without reading the data files.
///
/// Without usable files it falls back to the Moshier model and reports that
/// in the return flags. Nodes are analytical, so only the fallback bit is
/// checked for them.
fn check_return_flags(body: Graha, jd: f64, flags: i32) -> Result<(), EphemerisError> {
    let from_files = flags & SEFLG_SWIEPH != 0;
    let fell_back = flags & SEFLG_MOSEPH != 0;
    if fell_back || (!from_files && body != Graha::Rahu) {
        log::warn!("swiss ephemeris degraded for {} at JD {}: flags {:#x}", body, jd, flags);
        return Err(EphemerisError::Degraded { body, jd, flags });
    }
    Ok(())
}

/// The C library takes the data path as a NUL-terminated UTF-8 string.
fn ephe_path_string(path: &Path) -> Result<String, EphemerisError> {
    let invalid = |message: &str| EphemerisError::FileNotFound {
        path: path.display().to_string(),
        message: message.to_string(),
    };
    let text = path.to_str().ok_or_else(|| invalid("Ephemeris path is not valid UTF-8."))?;
    if text.contains('\0') {
        return Err(invalid("Ephemeris path contains a NUL byte."));
    }
    Ok(text.to_string())
}

/// The directory must exist and hold at least one `.se1` data file.
///
/// Catches the common misconfiguration up front; unreadable files are
/// caught later by [`check_return_flags`].
fn validate_ephemeris_dir(path: &Path) -> Result<(), EphemerisError> {
    if !path.exists() {
        return Err(EphemerisError::FileNotFound {
            path: path.display().to_string(),
            message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
        });
    }

    let entries = std::fs::read_dir(path).map_err(|e| EphemerisError::FileNotFound {
        path: path.display().to_string(),
        message: format!("Ephemeris path is not readable: {}", e),
    })?;
    let has_data = entries
        .filter_map(Result::ok)
        .any(|entry| entry.path().extension().is_some_and(|ext| ext == "se1"));

    if has_data {
        Ok(())
    } else {
        Err(EphemerisError::FileNotFound {
            path: path.display().to_string(),
            message: "No .se1 data files found in ephemeris directory.".to_string(),
        })
    }
}
