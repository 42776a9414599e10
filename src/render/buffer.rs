use bytemuck::Pod;
use gl::types::*;
use std::mem;

/// ARRAY_BUFFER handle; uploads once at construction.
pub struct VertexBuffer {
    id: GLuint,
}

impl VertexBuffer {
    pub fn new<T: Pod>(data: &[T]) -> Self {
        let mut id = 0;
        let bytes: &[u8] = bytemuck::cast_slice(data);
        unsafe {
            gl::GenBuffers(1, &mut id);
            gl::BindBuffer(gl::ARRAY_BUFFER, id);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                bytes.len() as GLsizeiptr,
                bytes.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );
        }
        Self { id }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, self.id);
        }
    }

    pub fn unbind() {
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.id);
        }
    }
}

/// ELEMENT_ARRAY_BUFFER handle; remembers its index count for draw calls.
pub struct IndexBuffer {
    id: GLuint,
    count: usize,
}

impl IndexBuffer {
    pub fn new(indices: &[u32]) -> Self {
        let mut id = 0;
        unsafe {
            gl::GenBuffers(1, &mut id);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, id);
            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                mem::size_of_val(indices) as GLsizeiptr,
                indices.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );
        }
        Self {
            id,
            count: indices.len(),
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn count(&self) -> GLsizei {
        self.count as GLsizei
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, self.id);
        }
    }
}

impl Drop for IndexBuffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.id);
        }
    }
}

pub struct VertexArray {
    id: GLuint,
}

impl VertexArray {
    pub fn new() -> Self {
        let mut id = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut id);
        }
        Self { id }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindVertexArray(self.id);
        }
    }

    pub fn unbind() {
        unsafe {
            gl::BindVertexArray(0);
        }
    }
}

impl Default for VertexArray {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.id);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttrib {
    pub index: GLuint,
    pub components: GLint,
    pub offset: usize,
}

/// Interleaved float attribute layout. Offsets and stride are byte values
/// accumulated in push order.
#[derive(Debug, Default, Clone)]
pub struct VertexLayout {
    attribs: Vec<VertexAttrib>,
    stride: usize,
}

impl VertexLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_f32(mut self, components: GLint) -> Self {
        let index = self.attribs.len() as GLuint;
        self.attribs.push(VertexAttrib {
            index,
            components,
            offset: self.stride,
        });
        self.stride += components as usize * mem::size_of::<f32>();
        self
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn attribs(&self) -> &[VertexAttrib] {
        &self.attribs
    }

    /// Points the bound vertex buffer's data at the attribute slots.
    pub fn apply(&self) {
        for attrib in &self.attribs {
            unsafe {
                gl::VertexAttribPointer(
                    attrib.index,
                    attrib.components,
                    gl::FLOAT,
                    gl::FALSE,
                    self.stride as GLsizei,
                    attrib.offset as *const _,
                );
                gl::EnableVertexAttribArray(attrib.index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_single_attribute() {
        let layout = VertexLayout::new().push_f32(2);
        assert_eq!(layout.stride(), 8);
        assert_eq!(
            layout.attribs(),
            &[VertexAttrib {
                index: 0,
                components: 2,
                offset: 0
            }]
        );
    }

    #[test]
    fn test_layout_interleaved() {
        let layout = VertexLayout::new().push_f32(3).push_f32(2);
        assert_eq!(layout.stride(), 20);
        assert_eq!(layout.attribs()[0].offset, 0);
        assert_eq!(layout.attribs()[1].offset, 12);
        assert_eq!(layout.attribs()[1].index, 1);
    }

    #[test]
    fn test_layout_empty() {
        let layout = VertexLayout::new();
        assert_eq!(layout.stride(), 0);
        assert!(layout.attribs().is_empty());
    }
}
