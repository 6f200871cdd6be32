/// GATT-specific tags treated as fault domains.
pub const FAULT_TAGS: &[&str] = &["BtGatt", "BtGatt.GattService"];

/// Message keywords (lowercase) that mark a GATT fault.
pub const FAULT_KEYWORDS: &[&str] = &[
    "gatt_indication_confirmation_timeout",
    "service changed notification timed out",
    "service changed",
    "gatt timeout",
];

/// Lowercase substrings of the indication/confirmation timeout.
pub const INDICATION_TIMEOUT_MARKERS: &[&str] = &[
    "gatt_indication_confirmation_timeout",
    "service changed notification timed out",
];

/// GATT client callbacks that report an operation status.
pub const CALLBACK_MARKERS: &[&str] = &[
    "oncharacteristicwrite",
    "oncharacteristicread",
    "ondescriptorwrite",
    "ondescriptorread",
    "onconnectioncongested",
];

/// Lowercase congestion markers accepted without a status code.
pub const CONGESTION_MARKERS: &[&str] = &["congest", "busy"];

/// GATT_CONGESTED and GATT_BUSY.
pub const CONGESTION_STATUS_CODES: &[u32] = &[0x8f, 0x84];
