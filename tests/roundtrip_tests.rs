use huffman_codec::{
    compress, decompress, decompress_with_table, CodeTable, CodeTree, CodecParams,
    FrequencyTable, HuffmanCodec, HuffmanError, PaddedBitBuffer,
};

#[test]
fn test_aabbbcc_end_to_end() {
    let input = b"aabbbcc";

    let frequencies = FrequencyTable::from_symbols(input).expect("non-empty input");
    assert_eq!(frequencies.get(&b'a'), Some(2));
    assert_eq!(frequencies.get(&b'b'), Some(3));
    assert_eq!(frequencies.get(&b'c'), Some(2));

    let tree = CodeTree::build(&frequencies).expect("tree");
    assert_eq!(tree.leaf_count(), 3);
    assert_eq!(tree.internal_count(), 2);

    let table = CodeTable::from_tree(&tree);
    table.verify_prefix_free().expect("prefix-free");
    let bits: usize = input
        .iter()
        .map(|s| table.code_for(s).map_or(0, |c| c.len()))
        .sum();
    assert_eq!(bits, 11);

    let (buffer, tree) = compress(input).expect("compress");
    assert_eq!(buffer.padding(), Some(5));
    assert_eq!(buffer.len(), 3);
    assert_eq!(decompress(&buffer, Some(&tree)).expect("decompress"), input);
}

#[test]
fn test_single_symbol_input() {
    let (buffer, tree) = compress(b"aaaa").expect("compress");
    let table = CodeTable::from_tree(&tree);
    assert_eq!(table.code_for(&b'a').map(|c| c.to_string()), Some("0".to_string()));
    assert!(!buffer.is_empty());
    assert_eq!(decompress(&buffer, Some(&tree)).expect("decompress"), b"aaaa");
}

#[test]
fn test_long_single_symbol_input_packs_one_bit_each() {
    let input = vec![b'z'; 1000];
    let (buffer, tree) = compress(&input).expect("compress");
    // 1000 bits = 125 bytes exactly, plus a full padding byte and the header
    assert_eq!(buffer.len(), 1 + 125 + 1);
    assert_eq!(buffer.padding(), Some(8));
    assert_eq!(decompress(&buffer, Some(&tree)).expect("decompress"), input);
}

#[test]
fn test_all_byte_values() {
    let input: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let (buffer, tree) = compress(&input).expect("compress");
    assert_eq!(tree.leaf_count(), 256);
    // Uniform weights give every symbol an 8-bit code.
    assert_eq!(CodeTable::from_tree(&tree).max_code_len(), 8);
    assert_eq!(decompress(&buffer, Some(&tree)).expect("decompress"), input);
}

#[test]
fn test_text_compresses_below_original_size() {
    let text = "it was the best of times, it was the worst of times, it was the age of wisdom, \
                it was the age of foolishness"
        .repeat(20);
    let compressed = HuffmanCodec::new().compress(text.as_bytes()).expect("compress");
    assert!(compressed.stats.ratio() < 0.7, "ratio {}", compressed.stats.ratio());
}

#[test]
fn test_unicode_characters() {
    let text: Vec<char> = "Ωμέγα → αλφα, 漢字かな交じり文, emoji 🎉🎉🎉".chars().collect();
    let (buffer, tree) = compress(&text).expect("compress");
    let restored: String = decompress(&buffer, Some(&tree))
        .expect("decompress")
        .into_iter()
        .collect();
    assert_eq!(restored, text.iter().collect::<String>());
}

#[test]
fn test_determinism() {
    let input = b"determinism requires a fixed tie-break between equal weights";
    let (first_buffer, first_tree) = compress(input).expect("compress");
    let (second_buffer, second_tree) = compress(input).expect("compress");
    assert_eq!(first_buffer, second_buffer);
    assert_eq!(first_tree, second_tree);
    assert_eq!(
        CodeTable::from_tree(&first_tree),
        CodeTable::from_tree(&second_tree)
    );
}

#[test]
fn test_decode_with_table_only() {
    let mut codec = HuffmanCodec::new();
    let compressed = codec.compress(b"table driven").expect("compress");
    let table = codec.codes().cloned().expect("table");
    assert_eq!(
        decompress_with_table(&compressed.buffer, Some(&table)).expect("decompress"),
        b"table driven"
    );
}

#[test]
fn test_decoding_with_another_inputs_tree_fails_or_differs() {
    let (buffer, _) = compress(b"first input").expect("compress");
    let (_, other_tree) = compress(b"xy").expect("compress");
    match decompress(&buffer, Some(&other_tree)) {
        Ok(symbols) => assert_ne!(symbols, b"first input"),
        Err(err) => assert!(matches!(err, HuffmanError::CorruptStream(_))),
    }
}

#[test]
fn test_corruption_detection() {
    let (buffer, tree) = compress(b"corruption must surface as an error").expect("compress");

    let mut bad_header = buffer.as_bytes().to_vec();
    bad_header[0] = 200;
    assert!(matches!(
        decompress(&PaddedBitBuffer::from_bytes(bad_header), Some(&tree)),
        Err(HuffmanError::MalformedHeader { padding: 200, .. })
    ));

    assert!(matches!(
        decompress(&PaddedBitBuffer::from_bytes(vec![]), Some(&tree)),
        Err(HuffmanError::MalformedHeader { .. })
    ));

    assert!(matches!(
        decompress(&PaddedBitBuffer::from_bytes(vec![3]), Some(&tree)),
        Err(HuffmanError::MalformedHeader { padding: 3, available_bits: 0 })
    ));
}

#[test]
fn test_truncation_mid_code() {
    // With a single-bit code for 'a' and longer codes elsewhere, chopping
    // the last payload bit off a buffer ending in a long code leaves a
    // dangling prefix.
    let input = b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaabcdefgh";
    let (buffer, tree) = compress(input).expect("compress");
    let table = CodeTable::from_tree(&tree);
    assert!(table.code_for(&b'h').map_or(0, |c| c.len()) > 1);

    let mut bytes = buffer.into_bytes();
    // One more padding bit hides the final payload bit.
    if bytes[0] < 8 {
        bytes[0] += 1;
    } else {
        bytes.pop();
        bytes[0] = 1;
    }
    assert!(matches!(
        decompress(&PaddedBitBuffer::from_bytes(bytes), Some(&tree)),
        Err(HuffmanError::CorruptStream(_))
    ));
}

#[test]
fn test_verify_codes_param() {
    let params = CodecParams::new().with_verify_codes(true);
    let mut codec = HuffmanCodec::with_params(params.clone());
    assert_eq!(codec.params(), &params);
    let compressed = codec.compress(b"verified").expect("compress");
    assert_eq!(codec.decompress(&compressed.buffer).expect("decompress"), b"verified");
}

#[test]
fn test_independent_sessions_on_threads() {
    let inputs: Vec<Vec<u8>> = (0..4u8)
        .map(|i| (0..500u32).map(|j| b'a' + ((j * (i as u32 + 1)) % 13) as u8).collect())
        .collect();

    let handles: Vec<_> = inputs
        .iter()
        .cloned()
        .map(|input| {
            std::thread::spawn(move || {
                let mut codec = HuffmanCodec::new();
                let compressed = codec.compress(&input).expect("compress");
                codec.decompress(&compressed.buffer).expect("decompress")
            })
        })
        .collect();

    for (handle, input) in handles.into_iter().zip(inputs) {
        assert_eq!(handle.join().expect("thread"), input);
    }
}
