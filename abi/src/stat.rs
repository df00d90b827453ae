//! The stat ABI: an internal extended stat, and the legacy `struct stat`
//! layout handlers must emit to the guest (spec.md §6).

/// A backend's view of a file's metadata, deliberately narrower than a
/// real `statx` — only the fields the legacy translation in spec.md §6
/// needs are carried.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExtendedStat {
    pub dev: u64,
    pub ino: u64,
    pub mode: u32,
    pub nlink: u32,
    pub uid: u32,
    pub gid: u32,
    pub rdev: u64,
    pub size: u64,
    pub blksize: u32,
    pub blocks: u64,
    pub atime_sec: i64,
    pub atime_nsec: i64,
    pub mtime_sec: i64,
    pub mtime_nsec: i64,
    pub ctime_sec: i64,
    pub ctime_nsec: i64,
}

/// The legacy `struct stat` layout (x86_64 Linux ABI), byte-for-byte what
/// handlers write into guest memory.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyStat {
    pub st_dev: u64,
    pub st_ino: u64,
    pub st_nlink: u64,
    pub st_mode: u32,
    pub st_uid: u32,
    pub st_gid: u32,
    pub __pad0: u32,
    pub st_rdev: u64,
    pub st_size: i64,
    pub st_blksize: i64,
    pub st_blocks: i64,
    pub st_atime: i64,
    pub st_atime_nsec: i64,
    pub st_mtime: i64,
    pub st_mtime_nsec: i64,
    pub st_ctime: i64,
    pub st_ctime_nsec: i64,
    pub __unused: [i64; 3],
}

impl From<ExtendedStat> for LegacyStat {
    fn from(x: ExtendedStat) -> Self {
        LegacyStat {
            st_dev: x.dev,
            st_ino: x.ino,
            st_nlink: x.nlink as u64,
            st_mode: x.mode,
            st_uid: x.uid,
            st_gid: x.gid,
            __pad0: 0,
            st_rdev: x.rdev,
            st_size: x.size as i64,
            st_blksize: x.blksize as i64,
            st_blocks: x.blocks as i64,
            st_atime: x.atime_sec,
            st_atime_nsec: x.atime_nsec,
            st_mtime: x.mtime_sec,
            st_mtime_nsec: x.mtime_nsec,
            st_ctime: x.ctime_sec,
            st_ctime_nsec: x.ctime_nsec,
            __unused: [0; 3],
        }
    }
}

/// Bytes of a `LegacyStat`, for writing into guest memory via the bridge.
pub fn legacy_stat_bytes(stat: &LegacyStat) -> &[u8] {
    // SAFETY: `LegacyStat` is `repr(C)` and made entirely of plain integer
    // fields, so any byte pattern is a valid `[u8]` view of it.
    unsafe {
        core::slice::from_raw_parts(
            (stat as *const LegacyStat) as *const u8,
            core::mem::size_of::<LegacyStat>(),
        )
    }
}
