//! Device capability provider.
//!
//! Rotation, screen power and the platform long-press threshold are owned
//! by the device; the core only queries and commands them.

use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uidrive_common::error::UidriveResult;

/// Physical display rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Whether the device is in its natural orientation (0 or 180 degrees).
    pub fn is_natural(self) -> bool {
        matches!(self, Rotation::Deg0 | Rotation::Deg180)
    }

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }
}

/// Rotation command accepted by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationCommand {
    /// Re-enable sensors; contents follow the physical orientation.
    Unfreeze,
    /// Disable sensors and hold the current rotation.
    FreezeCurrent,
    /// Disable sensors and rotate to the given orientation.
    Freeze(Rotation),
}

/// Queries and commands the core needs from the device.
pub trait DeviceControl: Send + Sync {
    /// How long a touch must be held to register as a long press.
    fn long_press_timeout(&self) -> Duration;

    fn rotation(&self) -> UidriveResult<Rotation>;

    fn set_rotation(&self, command: RotationCommand) -> UidriveResult<()>;

    fn is_screen_on(&self) -> UidriveResult<bool>;
}

#[derive(Debug)]
struct DeviceState {
    rotation: Rotation,
    frozen: bool,
    screen_on: bool,
}

/// In-process device with settable state, for tests and dry runs.
#[derive(Debug)]
pub struct SimulatedDevice {
    long_press: Duration,
    state: Mutex<DeviceState>,
}

impl SimulatedDevice {
    pub fn new(long_press: Duration) -> Self {
        Self {
            long_press,
            state: Mutex::new(DeviceState {
                rotation: Rotation::Deg0,
                frozen: false,
                screen_on: true,
            }),
        }
    }

    pub fn set_screen_on(&self, on: bool) {
        self.lock().screen_on = on;
    }

    /// Simulate the physical orientation changing.
    pub fn rotate_physically(&self, rotation: Rotation) {
        let mut state = self.lock();
        if !state.frozen {
            state.rotation = rotation;
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.lock().frozen
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DeviceState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for SimulatedDevice {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

impl DeviceControl for SimulatedDevice {
    fn long_press_timeout(&self) -> Duration {
        self.long_press
    }

    fn rotation(&self) -> UidriveResult<Rotation> {
        Ok(self.lock().rotation)
    }

    fn set_rotation(&self, command: RotationCommand) -> UidriveResult<()> {
        let mut state = self.lock();
        match command {
            RotationCommand::Unfreeze => state.frozen = false,
            RotationCommand::FreezeCurrent => state.frozen = true,
            RotationCommand::Freeze(rotation) => {
                state.rotation = rotation;
                state.frozen = true;
            }
        }
        tracing::debug!(?command, rotation = state.rotation.degrees(), "Rotation set");
        Ok(())
    }

    fn is_screen_on(&self) -> UidriveResult<bool> {
        Ok(self.lock().screen_on)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_rotations() {
        assert!(Rotation::Deg0.is_natural());
        assert!(Rotation::Deg180.is_natural());
        assert!(!Rotation::Deg90.is_natural());
        assert!(!Rotation::Deg270.is_natural());
    }

    #[test]
    fn test_freeze_holds_rotation() {
        let device = SimulatedDevice::default();
        device.set_rotation(RotationCommand::FreezeCurrent).unwrap();
        device.rotate_physically(Rotation::Deg90);
        assert_eq!(device.rotation().unwrap(), Rotation::Deg0);

        device.set_rotation(RotationCommand::Unfreeze).unwrap();
        device.rotate_physically(Rotation::Deg90);
        assert_eq!(device.rotation().unwrap(), Rotation::Deg90);
        assert!(!device.is_frozen());

        device
            .set_rotation(RotationCommand::Freeze(Rotation::Deg270))
            .unwrap();
        assert_eq!(device.rotation().unwrap(), Rotation::Deg270);
        assert!(device.is_frozen());
    }
}
