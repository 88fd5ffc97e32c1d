/// Read the whole text of an FLTK `TextBuffer` and free the C copy.
///
/// `TextBuffer::text()` copies FLTK's `malloc()`'d string into a `String` but
/// never releases the original, so every call leaks the buffer size. The editor
/// copies its buffer into the active note on every modification, which makes
/// that leak grow with each keystroke; this helper goes through the C API
/// directly and frees the allocation itself.
pub fn buffer_text_no_leak(buf: &fltk::text::TextBuffer) -> String {
    unsafe extern "C" {
        fn Fl_Text_Buffer_text(buf: *mut std::ffi::c_void) -> *mut std::ffi::c_char;
        fn free(ptr: *mut std::ffi::c_void);
    }

    // SAFETY: `buf.as_ptr()` is the live FLTK buffer owned by `buf`.
    // Fl_Text_Buffer_text returns a malloc'd, NUL-terminated copy (or null),
    // which is copied into a Rust String and then released with the matching
    // `free`. FLTK is initialised before any TextBuffer exists.
    unsafe {
        let inner = buf.as_ptr() as *mut std::ffi::c_void;
        let ptr = Fl_Text_Buffer_text(inner);
        if ptr.is_null() {
            return String::new();
        }
        let text = std::ffi::CStr::from_ptr(ptr).to_string_lossy().into_owned();
        free(ptr as *mut std::ffi::c_void);
        text
    }
}
