use sable_client::{
    create_password_verifier, handshake as client_handshake, password_check_server,
    password_client_proof, verify, Client,
};
use sable_core::pake::Profile;
use sable_core::rng::SecretRng;
use sable_core::types::*;
use sable_server::{
    handshake as server_handshake, password_challenge, password_server_proof, sign, Server,
};

const USERNAME: &[u8] = b"alice";
const REALM: &[u8] = b"sable.test";
const PASSWORD: &[u8] = b"correct horse battery staple";

fn seeded_server(label: &[u8]) -> Server {
    Server::from_rng(SecretRng::from_seed(label)).unwrap()
}

#[test]
fn every_flipped_signature_bit_is_rejected() {
    let server = seeded_server(b"prop-sign");
    let public = server.public_key().unwrap();
    let message = b"a message worth signing";

    let mut signature = [0u8; SIGNATURE_LENGTH];
    sign(&server, message, &mut signature).unwrap();
    verify(message, &public, &signature).unwrap();

    for index in 0..SIGNATURE_LENGTH {
        let mut tampered = signature;
        tampered[index] ^= 0x01;
        assert!(
            verify(message, &public, &tampered).is_err(),
            "accepted a signature flipped at byte {index}"
        );
    }
}

#[test]
fn tampered_message_and_public_key_are_rejected() {
    let server = seeded_server(b"prop-sign-msg");
    let public = server.public_key().unwrap();
    let mut signature = [0u8; SIGNATURE_LENGTH];
    sign(&server, b"payload", &mut signature).unwrap();

    assert!(verify(b"payloae", &public, &signature).is_err());
    assert!(verify(b"payload!", &public, &signature).is_err());

    let other = seeded_server(b"prop-sign-other").public_key().unwrap();
    assert!(verify(b"payload", &other, &signature).is_err());
}

#[test]
fn every_flipped_response_byte_is_rejected() {
    let mut server = seeded_server(b"prop-response");
    let public = server.public_key().unwrap();

    let mut baseline = Client::from_rng(SecretRng::from_seed(b"prop-response-cli")).unwrap();
    let request = baseline.request().unwrap();
    let mut response = [0u8; SERVER_RESPONSE_LENGTH];
    let mut server_key = [0u8; SESSION_KEY_LENGTH];
    server_handshake(&mut server, &request, &mut response, &mut server_key).unwrap();

    let mut client_key = [0u8; SESSION_KEY_LENGTH];
    for index in 0..SERVER_RESPONSE_LENGTH {
        let mut fresh = Client::from_rng(SecretRng::from_seed(b"prop-response-cli")).unwrap();
        let mut tampered = response;
        tampered[index] ^= 0x01;
        assert!(
            client_handshake(&mut fresh, &public, &tampered, &mut client_key).is_err(),
            "accepted a response flipped at byte {index}"
        );
    }

    client_handshake(&mut baseline, &public, &response, &mut client_key).unwrap();
    assert_eq!(client_key, server_key);
}

struct PakeFixture {
    server: Server,
    secret: Vec<u8>,
    challenge: Vec<u8>,
    server_public: Point,
}

fn pake_fixture(profile: Profile) -> PakeFixture {
    let mut server = Server::generate(None).unwrap();
    let mut client = Client::generate(None).unwrap();

    let mut verifier = vec![0u8; profile.verifier_length()];
    create_password_verifier(&mut client, profile, USERNAME, REALM, PASSWORD, &mut verifier)
        .unwrap();

    let mut secret = vec![0u8; profile.challenge_secret_length()];
    let mut challenge = vec![0u8; profile.challenge_length()];
    password_challenge(&mut server, profile, &verifier, &mut secret, &mut challenge).unwrap();

    let server_public = server.public_key().unwrap();
    PakeFixture {
        server,
        secret,
        challenge,
        server_public,
    }
}

fn prove(
    fixture: &PakeFixture,
    profile: Profile,
    username: &[u8],
    realm: &[u8],
    password: &[u8],
    server_public: &Point,
) -> ([u8; SERVER_PROOF_LENGTH], [u8; CLIENT_PROOF_LENGTH]) {
    let mut client = Client::generate(None).unwrap();
    let mut server_verifier = [0u8; SERVER_PROOF_LENGTH];
    let mut client_proof = [0u8; CLIENT_PROOF_LENGTH];
    password_client_proof(
        &mut client,
        profile,
        username,
        realm,
        password,
        &fixture.challenge,
        server_public,
        &mut server_verifier,
        &mut client_proof,
    )
    .unwrap();
    (server_verifier, client_proof)
}

#[test]
fn pake_accepts_only_the_exact_identity_tuple() {
    let profile = Profile::Desktop;
    let fixture = pake_fixture(profile);
    let mut server_proof = [0u8; SERVER_PROOF_LENGTH];

    // honest run
    let (server_verifier, client_proof) = prove(
        &fixture,
        profile,
        USERNAME,
        REALM,
        PASSWORD,
        &fixture.server_public,
    );
    password_server_proof(
        &fixture.server,
        profile,
        &client_proof,
        &fixture.secret,
        &mut server_proof,
    )
    .unwrap();
    password_check_server(&server_proof, &server_verifier).unwrap();

    // wrong username, realm, or password: the server must refuse
    for (username, realm, password) in [
        (b"alicf".as_slice(), REALM, PASSWORD),
        (USERNAME, b"sable.prod".as_slice(), PASSWORD),
        (USERNAME, REALM, b"incorrect horse".as_slice()),
    ] {
        let (_, client_proof) = prove(
            &fixture,
            profile,
            username,
            realm,
            password,
            &fixture.server_public,
        );
        assert!(
            password_server_proof(
                &fixture.server,
                profile,
                &client_proof,
                &fixture.secret,
                &mut server_proof,
            )
            .is_err(),
            "server accepted a proof for a wrong identity tuple"
        );
    }
}

#[test]
fn pake_binds_the_server_static_key() {
    let profile = Profile::Desktop;
    let fixture = pake_fixture(profile);

    let imposter = seeded_server(b"pake-imposter").public_key().unwrap();
    let (_, client_proof) = prove(&fixture, profile, USERNAME, REALM, PASSWORD, &imposter);

    let mut server_proof = [0u8; SERVER_PROOF_LENGTH];
    assert!(password_server_proof(
        &fixture.server,
        profile,
        &client_proof,
        &fixture.secret,
        &mut server_proof,
    )
    .is_err());
}

#[test]
fn tampered_client_proof_is_rejected() {
    for profile in [Profile::Desktop, Profile::Mobile] {
        let fixture = pake_fixture(profile);
        let (_, client_proof) = prove(
            &fixture,
            profile,
            USERNAME,
            REALM,
            PASSWORD,
            &fixture.server_public,
        );

        let mut server_proof = [0u8; SERVER_PROOF_LENGTH];
        for index in [0, POINT_LENGTH - 1, POINT_LENGTH, CLIENT_PROOF_LENGTH - 1] {
            let mut tampered = client_proof;
            tampered[index] ^= 0x01;
            assert!(
                password_server_proof(
                    &fixture.server,
                    profile,
                    &tampered,
                    &fixture.secret,
                    &mut server_proof,
                )
                .is_err(),
                "accepted a client proof flipped at byte {index}"
            );
        }
    }
}

#[test]
fn tampered_challenge_secret_is_rejected() {
    let profile = Profile::Desktop;
    let fixture = pake_fixture(profile);
    let (_, client_proof) = prove(
        &fixture,
        profile,
        USERNAME,
        REALM,
        PASSWORD,
        &fixture.server_public,
    );

    let mut server_proof = [0u8; SERVER_PROOF_LENGTH];
    for index in [0, POINT_LENGTH, POINT_LENGTH + SCALAR_LENGTH] {
        let mut tampered = fixture.secret.clone();
        tampered[index] ^= 0x01;
        assert!(password_server_proof(
            &fixture.server,
            profile,
            &client_proof,
            &tampered,
            &mut server_proof,
        )
        .is_err());
    }
}

#[test]
fn tampered_server_proof_fails_the_client_check() {
    let profile = Profile::Mobile;
    let fixture = pake_fixture(profile);
    let (server_verifier, client_proof) = prove(
        &fixture,
        profile,
        USERNAME,
        REALM,
        PASSWORD,
        &fixture.server_public,
    );

    let mut server_proof = [0u8; SERVER_PROOF_LENGTH];
    password_server_proof(
        &fixture.server,
        profile,
        &client_proof,
        &fixture.secret,
        &mut server_proof,
    )
    .unwrap();
    password_check_server(&server_proof, &server_verifier).unwrap();

    for index in 0..SERVER_PROOF_LENGTH {
        let mut tampered = server_proof;
        tampered[index] ^= 0x01;
        assert!(password_check_server(&tampered, &server_verifier).is_err());
    }
    assert!(password_check_server(&server_proof[..16], &server_verifier).is_err());
}

#[test]
fn altered_salt_breaks_the_exchange() {
    let profile = Profile::Desktop;
    let fixture = pake_fixture(profile);

    let mut altered = fixture.challenge.clone();
    let last = altered.len() - 1;
    altered[last] ^= 0x01;

    let mut client = Client::generate(None).unwrap();
    let mut server_verifier = [0u8; SERVER_PROOF_LENGTH];
    let mut client_proof = [0u8; CLIENT_PROOF_LENGTH];
    password_client_proof(
        &mut client,
        profile,
        USERNAME,
        REALM,
        PASSWORD,
        &altered,
        &fixture.server_public,
        &mut server_verifier,
        &mut client_proof,
    )
    .unwrap();

    let mut server_proof = [0u8; SERVER_PROOF_LENGTH];
    assert!(password_server_proof(
        &fixture.server,
        profile,
        &client_proof,
        &fixture.secret,
        &mut server_proof,
    )
    .is_err());
}
