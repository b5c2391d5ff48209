use {crate::ModuleError, borsh::BorshSerialize, std::sync::Once};

#[cfg(target_arch = "wasm32")]
#[link(wasm_import_module = "env")]
extern "C" {
  #[link_name = "log"]
  fn abi_log(message: *const u8, len: u32);

  #[link_name = "abort"]
  fn abi_abort(error: u64);
}

#[no_mangle]
pub extern "C" fn allocate(size: u32) -> *mut u8 {
  let mut buf = Vec::with_capacity(size as usize);
  let ptr = buf.as_mut_ptr();
  core::mem::forget(buf);
  ptr
}

/// Leaks `bytes` and returns their location as `(ptr << 32) | len`,
/// the form in which values are handed back to the host.
///
/// Only meaningful on wasm32, where pointers are 32 bits wide.
pub fn pack(bytes: impl Into<Vec<u8>>) -> u64 {
  let bytes: &'static mut [u8] = Box::leak(bytes.into().into_boxed_slice());
  let len = bytes.len() as u64;
  let addr = bytes.as_ptr() as u64;
  (addr << 32) | len
}

/// Debug log a message during module execution.
/// The host forwards it to its own log output.
pub fn log(msg: &str) {
  #[cfg(target_arch = "wasm32")]
  unsafe {
    abi_log(msg.as_ptr(), msg.len() as u32)
  };

  #[cfg(not(target_arch = "wasm32"))]
  let _ = msg;
}

/// Interrupt the execution of a module with an error value.
pub fn abort(error: ModuleError) -> ! {
  let bytes = error.try_to_vec().unwrap_or_default();

  #[cfg(target_arch = "wasm32")]
  unsafe {
    abi_abort(pack(bytes))
  };

  #[cfg(not(target_arch = "wasm32"))]
  let _ = bytes;

  panic!("module aborted: {error:?}");
}

/// Routes panic messages through [`log`] so they show up on the
/// host before the resulting trap.
pub fn set_panic_hook() {
  static HOOK: Once = Once::new();
  HOOK.call_once(|| {
    std::panic::set_hook(Box::new(|info| log(&info.to_string())));
  });
}
