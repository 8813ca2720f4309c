//! Manually sized limb storage.
//!
//! A `LimbBuffer` owns a single heap region obtained straight from the global
//! allocator. Its length is decided up front and only changes when an owner
//! explicitly grows it; nothing here tracks how many limbs are significant,
//! that is the owner's business. Every limb in `0..capacity` is initialized,
//! fresh limbs are zeroed when the region is allocated or grown.

use crate::error::{Error, Result};
use crate::lib::*;
use crate::math::{limbs_for_bits, Limb, LIMB_BITS};

/// Owning handle to a contiguous run of limbs.
///
/// The handle is `None` exactly when the capacity is zero: either nothing
/// was ever allocated or the buffer has been released. Release happens once,
/// from `release` or from `Drop`, whichever comes first.
pub struct LimbBuffer {
    ptr: Option<NonNull<Limb>>,
    capacity: usize,
}

// The buffer is uniquely owned and has no interior mutability, so moving or
// sharing it across threads is as safe as for a `Box<[Limb]>`.
unsafe impl Send for LimbBuffer {}
unsafe impl Sync for LimbBuffer {}

impl LimbBuffer {
    /// An unallocated buffer.
    pub const fn new() -> Self {
        LimbBuffer {
            ptr: None,
            capacity: 0,
        }
    }

    /// Allocate a buffer of exactly `limbs` zeroed limbs.
    pub fn with_limbs(limbs: usize) -> Result<Self> {
        let mut buffer = LimbBuffer::new();
        buffer.ensure_capacity(limbs)?;
        Ok(buffer)
    }

    /// Make room for a value of at least `min_bits` bits.
    ///
    /// At least one limb is always allocated, so a zero-sized request still
    /// leaves the buffer usable. Never shrinks a larger buffer.
    pub fn allocate(&mut self, min_bits: usize) -> Result<()> {
        let limbs = limbs_for_bits(min_bits);
        self.ensure_capacity(if limbs == 0 { 1 } else { limbs })
    }

    /// Grow the buffer to hold at least `needed` limbs, preserving existing
    /// contents. Never shrinks.
    pub fn ensure_capacity(&mut self, needed: usize) -> Result<()> {
        if needed <= self.capacity {
            return Ok(());
        }

        let layout = match Layout::array::<Limb>(needed) {
            Ok(layout) => layout,
            Err(_) => return Err(Error::out_of_memory(needed)),
        };

        let raw = match self.ptr {
            None => unsafe { alloc_zeroed(layout) as *mut Limb },
            Some(ptr) => unsafe {
                // The old layout was valid when it was allocated, and the new
                // size was validated above.
                let old = Layout::array::<Limb>(self.capacity).unwrap_unchecked();
                let raw = realloc(ptr.as_ptr() as *mut u8, old, layout.size()) as *mut Limb;
                if !raw.is_null() {
                    ptr::write_bytes(raw.add(self.capacity), 0, needed - self.capacity);
                }
                raw
            },
        };

        match NonNull::new(raw) {
            Some(ptr) => {
                tracing::trace!(from = self.capacity, to = needed, "grew limb buffer");
                self.ptr = Some(ptr);
                self.capacity = needed;
                Ok(())
            }
            None => {
                // A failed realloc leaves the old region untouched and owned.
                tracing::debug!(limbs = needed, "limb allocation failed");
                Err(Error::out_of_memory(needed))
            }
        }
    }

    /// Free the storage, leaving an unallocated buffer. Calling this again
    /// is a no-op.
    pub fn release(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            unsafe {
                let layout = Layout::array::<Limb>(self.capacity).unwrap_unchecked();
                dealloc(ptr.as_ptr() as *mut u8, layout);
            }
            tracing::trace!(limbs = self.capacity, "released limb buffer");
        }
        self.capacity = 0;
    }

    /// Number of limbs currently allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of bits the buffer can hold without growing.
    #[inline]
    pub fn capacity_bits(&self) -> usize {
        self.capacity.saturating_mul(LIMB_BITS as usize)
    }

    /// Whether the buffer currently owns any storage.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.ptr.is_some()
    }

    /// Raw handle to the storage, null when unallocated.
    #[inline]
    pub fn as_ptr(&self) -> *const Limb {
        match self.ptr {
            Some(ptr) => ptr.as_ptr(),
            None => ptr::null(),
        }
    }

    /// All allocated limbs.
    #[inline]
    pub fn as_slice(&self) -> &[Limb] {
        match self.ptr {
            // Every limb below `capacity` was zeroed on allocation or written
            // since.
            Some(ptr) => unsafe { slice::from_raw_parts(ptr.as_ptr(), self.capacity) },
            None => &[],
        }
    }

    /// All allocated limbs, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Limb] {
        match self.ptr {
            Some(ptr) => unsafe { slice::from_raw_parts_mut(ptr.as_ptr(), self.capacity) },
            None => &mut [],
        }
    }

    /// Copy the first `len` limbs into a new buffer of the same capacity.
    pub fn try_clone(&self, len: usize) -> Result<Self> {
        debug_assert!(len <= self.capacity);
        let mut other = LimbBuffer::with_limbs(self.capacity)?;
        other.as_mut_slice()[..len].copy_from_slice(&self.as_slice()[..len]);
        Ok(other)
    }
}

impl Default for LimbBuffer {
    fn default() -> Self {
        LimbBuffer::new()
    }
}

impl Drop for LimbBuffer {
    fn drop(&mut self) {
        self.release();
    }
}

impl Debug for LimbBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("LimbBuffer")
            .field("ptr", &self.as_ptr())
            .field("capacity", &self.capacity)
            .finish()
    }
}

/// Abort on allocation failure the way `Vec` does, for the infallible
/// constructors and operators.
#[cold]
pub(crate) fn abort_on_oom(limbs: usize) -> ! {
    let layout = Layout::array::<Limb>(limbs).unwrap_or_else(|_| Layout::new::<Limb>());
    handle_alloc_error(layout)
}
