use inputmodule::protocol::{
    Brightness, Command, CommandCode, DRAW_BW_LEN, DrawBw, HEADER_LEN, PayloadHeader,
    RESPONSE_SIZE, RawCommand, Reply, VersionReply,
};

#[test]
fn brightness_frame_matches_firmware() {
    assert_eq!(
        Brightness { brightness: 200 }.encode(),
        vec![0x32, 0xAC, 0x00, 0xC8]
    );
}

#[test]
fn header_survives_every_code() {
    for code in CommandCode::ALL {
        let frame = RawCommand::new(code, vec![]).encode();
        assert_eq!(frame.len(), HEADER_LEN);
        assert_eq!(frame[..2], PayloadHeader::MAGIC);
        assert_eq!(PayloadHeader::decode(&frame).unwrap().code, code);
    }
}

#[test]
fn raw_frame_length_is_header_plus_body() {
    let body: Vec<u8> = (0..17).collect();
    let frame = RawCommand::new(CommandCode::StageCol, body.clone()).encode();
    assert_eq!(frame.len(), HEADER_LEN + body.len());
    assert_eq!(frame[HEADER_LEN..], body[..]);
}

#[test]
fn blank_image_is_39_zero_bytes() {
    let frame = DrawBw::default().encode();
    assert_eq!(frame.len(), HEADER_LEN + DRAW_BW_LEN);
    assert!(frame[HEADER_LEN..].iter().all(|b| *b == 0));

    let frame = DrawBw::new([0xFF; DRAW_BW_LEN]).encode();
    assert_eq!(frame.len() - HEADER_LEN, 39);
}

#[test]
fn version_reply_from_frame() {
    let mut frame = [0u8; RESPONSE_SIZE];
    frame[..3].copy_from_slice(&[1, 0x23, 1]);

    let version = VersionReply::decode(&frame);
    assert_eq!(version.major(), 1);
    assert_eq!(version.minor(), 2);
    assert_eq!(version.patch(), 3);
    assert!(version.is_pre_release());
    assert_eq!(format!("{}", version), "1.2.3-pre");
}
