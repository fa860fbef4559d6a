// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::TryReserveError;

/// A reusable scratch buffer that grows geometrically and never shrinks.
///
/// The logical capacity starts at the value given to [`GrowableBuffer::new`]
/// and doubles until it covers a request. Contents are discarded on every
/// [`GrowableBuffer::begin`], but the allocation is kept, so steady-state
/// frames do not allocate at all.
#[derive(Debug, Clone)]
pub struct GrowableBuffer<T> {
    data: Vec<T>,
    capacity: usize,
    label: &'static str,
}

impl<T: Copy> GrowableBuffer<T> {
    /// Creates a buffer with room for `initial_capacity` elements.
    pub fn new(initial_capacity: usize, label: &'static str) -> Self {
        Self {
            data: Vec::with_capacity(initial_capacity),
            capacity: initial_capacity,
            label,
        }
    }

    /// Clears the buffer and makes sure it can hold `required` elements.
    ///
    /// Returns `Ok(true)` if the buffer had to grow. On allocation failure the
    /// previous capacity is kept and the buffer is left empty.
    pub fn begin(&mut self, required: usize) -> Result<bool, TryReserveError> {
        self.data.clear();
        if required <= self.capacity {
            return Ok(false);
        }

        let mut size = self.capacity.max(1);
        while size < required {
            size = size.checked_mul(2).unwrap_or(required);
        }

        self.data.try_reserve_exact(size)?;
        log::trace!(
            "GrowableBuffer({}): grew from {} to {} elements",
            self.label,
            self.capacity,
            size
        );
        self.capacity = size;
        Ok(true)
    }

    /// Appends an element. Callers reserve room with [`GrowableBuffer::begin`] first.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    /// Returns the elements written since the last [`GrowableBuffer::begin`].
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the number of elements written since the last [`GrowableBuffer::begin`].
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if nothing has been written since the last [`GrowableBuffer::begin`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the logical capacity, i.e. the high-water mark of all requests.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
