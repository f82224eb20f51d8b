use {
    alloy::primitives::{U256, U512, address},
    universal_link::{
        LinkFormat,
        MalformedLink,
        SalesOrder,
        SigningScheme,
        Verifier,
        signature::{self, EcdsaSignature},
    },
};

/// Sells tickets 0xb3 and 0xb4 for half an ether.
const LINK: &str = "https://app.awallet.io/AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABvBbWdOyAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAALyaECakvG8LqLvkhtHQnaVzKznkALMAtA==;1b;2981CF5F9C45E9957BE897ED2EC749A8CE16086942A241BCDA4E870259B53EF4;2EFBA4BEBC7E3AE4475F4D92BADC1DD4D14D95187CD7403F701AED48CA23737B";

/// Orders for a second contract, all signed by the same owner: a run of eight
/// tickets, a run of four and a single ticket.
const LINKS: [&str; 3] = [
    "https://app.awallet.io/AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWNFeF2KAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAtnMrrswHk+OKmJNHmavTx9w88xANMA1ADVANYA1wDYANkA2g==;1b;4C42984466C576E191687684A48674698510F750413A3F1F0B7F718BCBB37072;4EDF6FA41DAB5C3E6E7B468B2FE384E86B2FD93A9BF5F771C0AAA07C649106EB",
    "https://app.awallet.io/AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWNFeF2KAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAtnMrrswHk+OKmJNHmavTx9w88xANsA3ADdAN4=;1c;36F33C72C0B191A0C2587F36E5F77CF5A9243D34010119DDDD98390E6FF12014;1173094E702F64EA3233B9FE515AD7516B8A128E47E9D88BE1F5CC50A5E59295",
    "https://app.awallet.io/AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWNFeF2KAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAtnMrrswHk+OKmJNHmavTx9w88xAN8=;1b;623AFBCD4B439A738EBA820B0C1AEDB50FB23155ACABF735B72213E7D935D9E6;42F4EE7C87B63E72FE24C2A9CF323588331E02E5043CC3B91EBA20F53C6842E3",
];

const OWNER: &str = "0x007bee82bdd9e866b2bd114780a47f2261c684e3";

/// The owner's public key as a single integer, x followed by y.
const OWNER_KEY: &str = "3766624743362555291863022291641419798817556312446913485076900228931550311167262358936119031908256138233623094427893806146688851885551327681125435090087130";

fn half_ether() -> U256 {
    U256::from(500_000_000_000_000_000u64)
}

#[test]
fn universal_link_should_be_parsed_correctly() {
    observe::tracing::initialize_reentrant("universal_link=trace");

    let order = universal_link::parse(LINK).unwrap();
    assert_eq!(order.price_wei(), half_ether());
    assert_eq!(order.expiry(), 0);
    assert_eq!(
        universal_link::format::address(&order.contract_address()),
        "0xbc9a1026a4bc6f0ba8bbe486d1d09da5732b39e4"
    );
    assert_eq!(order.tickets().as_slice(), &[0xb3, 0xb4]);
    assert_eq!(order.message().len(), 88);

    assert!(Verifier::default().verify_owner_str(&order, OWNER));

    let key = order.recover_owner_key(SigningScheme::Keccak256).unwrap();
    assert_eq!(key.to_u512(), OWNER_KEY.parse::<U512>().unwrap());
    assert_eq!(
        signature::recover_public_key(
            SigningScheme::Keccak256,
            order.message(),
            &order.signature().to_bytes()
        )
        .unwrap(),
        key
    );
}

#[test]
fn universal_links_recover_the_owner() {
    let verifier = Verifier::default();
    let expected_tickets: [&[u16]; 3] = [
        &[0xd3, 0xd4, 0xd5, 0xd6, 0xd7, 0xd8, 0xd9, 0xda],
        &[0xdb, 0xdc, 0xdd, 0xde],
        &[0xdf],
    ];

    for (link, tickets) in LINKS.iter().zip(expected_tickets) {
        let order = universal_link::parse(link).unwrap();
        assert_eq!(
            order.contract_address(),
            address!("0b6732baecc0793e38a98934799abd3c7dc3cf31")
        );
        assert_eq!(order.price_wei(), U256::from(100_000_000_000_000_000u64));
        assert_eq!(order.tickets().as_slice(), tickets);

        let owner = verifier.resolve_owner(&order).unwrap();
        assert_eq!(universal_link::format::address(&owner), OWNER);
        assert!(verifier.verify_owner_str(&order, &OWNER.to_uppercase().replace("0X", "0x")));
    }
}

#[test]
fn long_run_is_a_single_range() {
    let order = universal_link::parse(LINKS[0]).unwrap();
    assert_eq!(order.tickets().runs(), vec![0xd3..=0xda]);
    assert_eq!(order.tickets().to_string(), "211-218");
}

#[test]
fn bad_links_should_throw() {
    assert!(matches!(
        universal_link::parse("https://www.awallet.io/import?bad"),
        Err(MalformedLink::UnknownPrefix)
    ));
    let import = LinkFormat::new(["https://www.awallet.io/import?"]);
    assert!(matches!(
        import.parse("https://www.awallet.io/import?bad"),
        Err(MalformedLink::FieldCount(1))
    ));
}

fn mutated(order: &SalesOrder, index: usize, byte: u8) -> SalesOrder {
    let mut signature = order.signature().to_bytes();
    signature[index] ^= byte;
    SalesOrder::from_payload(
        order.message().to_vec(),
        EcdsaSignature::from_bytes(&signature),
    )
    .unwrap()
}

#[test]
fn any_signature_mutation_is_untrusted() {
    let order = universal_link::parse(LINK).unwrap();
    let verifier = Verifier::default();
    let owner = universal_link::format::parse_address(OWNER).unwrap();
    assert!(verifier.verify_owner(&order, owner).is_trusted());

    // Recovery byte: 27 <-> 28 and out of range values.
    for flip in [0x07, 0x01, 0x80] {
        assert!(!verifier.verify_owner(&mutated(&order, 0, flip), owner).is_trusted());
    }
    // Every byte of r and s.
    for index in 1..EcdsaSignature::LEN {
        assert!(
            !verifier.verify_owner(&mutated(&order, index, 0x01), owner).is_trusted(),
            "mutation at byte {index} still verified"
        );
    }
}

#[test]
fn mutated_payload_is_untrusted() {
    let order = universal_link::parse(LINK).unwrap();
    let mut message = order.message().to_vec();
    // Claim ticket 0xb5 instead of 0xb4.
    *message.last_mut().unwrap() = 0xb5;
    let forged = SalesOrder::from_payload(message, *order.signature()).unwrap();

    assert!(!Verifier::default().verify_owner_str(&forged, OWNER));
}

#[test]
fn verifier_can_be_shared_between_threads() {
    let verifier = Verifier::default();
    let orders: Vec<SalesOrder> = std::iter::once(LINK)
        .chain(LINKS)
        .map(|link| universal_link::parse(link).unwrap())
        .collect();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for order in &orders {
                    assert!(verifier.verify_owner_str(order, OWNER));
                }
            });
        }
    });
}

fn owner_of(link: &str) -> Result<alloy::primitives::Address, universal_link::Error> {
    Ok(universal_link::parse(link)?.recover_owner(SigningScheme::Keccak256)?)
}

#[test]
fn decoding_and_recovery_share_an_error_type() {
    assert_eq!(universal_link::format::address(&owner_of(LINK).unwrap()), OWNER);
    assert!(matches!(
        owner_of("https://app.awallet.io/garbage"),
        Err(universal_link::Error::MalformedLink(_))
    ));

    let zero_r = LINK.replace(
        "2981CF5F9C45E9957BE897ED2EC749A8CE16086942A241BCDA4E870259B53EF4",
        &"0".repeat(64),
    );
    assert!(matches!(
        owner_of(&zero_r),
        Err(universal_link::Error::InvalidSignature(_))
    ));
}
