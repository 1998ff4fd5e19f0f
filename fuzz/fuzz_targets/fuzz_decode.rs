#![no_main]
use libfuzzer_sys::fuzz_target;
use zenraw::{ByteOrder, Layout, Limits};

fuzz_target!(|data: &[u8]| {
    // First 6 bytes pick the layout, the rest is the raw buffer.
    let Some((head, body)) = data.split_first_chunk::<6>() else {
        return;
    };
    let layout = Layout::new(u32::from(head[0]), u32::from(head[1]), u32::from(head[2] % 5), u32::from(head[3] % 5))
        .with_interleaved(head[4] & 1 == 1)
        .with_byte_order(if head[5] & 1 == 1 { ByteOrder::Big } else { ByteOrder::Little });

    // Must never panic, whatever the layout claims.
    let limits = Limits::none().with_max_memory(1 << 20);
    let Ok(decoded) = zenraw::DecodeRequest::new(&layout, body)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    assert_eq!(decoded.pixels().len() as u64, layout.expected_len().unwrap_or(u64::MAX));
    for y in 0..decoded.height {
        assert_eq!(decoded.row(y).map(<[u8]>::len), Some(decoded.stride()));
    }
});
